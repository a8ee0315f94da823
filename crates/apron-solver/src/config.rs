// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Solver configuration
//!
//! `SolverConfig` is a plain value built through the consuming
//! `SolverConfigBuilder`. Every limit is optional except the time budget,
//! which defaults to 30 seconds.
//!
//! ```rust
//! use apron_solver::config::{SolverConfig, ZeroRevenuePolicy};
//! use std::time::Duration;
//!
//! let config = SolverConfig::builder()
//!     .with_time_limit(Duration::from_secs(5))
//!     .with_threads(4)
//!     .with_zero_revenue_policy(ZeroRevenuePolicy::FillIdleBays)
//!     .build();
//! assert_eq!(config.threads(), 4);
//! assert_eq!(config.node_limit(), None);
//! ```

use std::{
    sync::{Arc, atomic::AtomicBool},
    time::Duration,
};

/// What to do with requests whose only options earn nothing.
///
/// The objective is indifferent to zero revenue assignments, so the search
/// never branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZeroRevenuePolicy {
    /// Zero revenue requests stay unassigned.
    #[default]
    LeaveUnassigned,
    /// After the search, park unassigned requests on compatible zero
    /// revenue bays that are still free. Revenue is unchanged.
    FillIdleBays,
}

impl std::fmt::Display for ZeroRevenuePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZeroRevenuePolicy::LeaveUnassigned => write!(f, "LeaveUnassigned"),
            ZeroRevenuePolicy::FillIdleBays => write!(f, "FillIdleBays"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    time_limit: Duration,
    clock_check_interval: u64,
    node_limit: Option<u64>,
    threads: usize,
    zero_revenue_policy: ZeroRevenuePolicy,
    log_interval: Option<Duration>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl SolverConfig {
    pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);
    pub const DEFAULT_CLOCK_CHECK_INTERVAL: u64 = 1024;

    #[inline]
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::new()
    }

    /// Wall-clock budget of one solve.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Number of search steps between two clock reads.
    #[inline]
    pub fn clock_check_interval(&self) -> u64 {
        self.clock_check_interval
    }

    #[inline]
    pub fn node_limit(&self) -> Option<u64> {
        self.node_limit
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    #[inline]
    pub fn zero_revenue_policy(&self) -> ZeroRevenuePolicy {
        self.zero_revenue_policy
    }

    /// Interval of the periodic progress log, if enabled.
    #[inline]
    pub fn log_interval(&self) -> Option<Duration> {
        self.log_interval
    }

    /// External stop flag. Raising it ends the search at the next step.
    #[inline]
    pub fn interrupt(&self) -> Option<&AtomicBool> {
        self.interrupt.as_deref()
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfigBuilder::new().build()
    }
}

impl std::fmt::Display for SolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverConfig(time_limit: {:?}, threads: {}, node_limit: {:?}, zero_revenue_policy: {})",
            self.time_limit, self.threads, self.node_limit, self.zero_revenue_policy
        )
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfigBuilder {
    time_limit: Duration,
    clock_check_interval: u64,
    node_limit: Option<u64>,
    threads: usize,
    zero_revenue_policy: ZeroRevenuePolicy,
    log_interval: Option<Duration>,
    interrupt: Option<Arc<AtomicBool>>,
}

impl Default for SolverConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            time_limit: SolverConfig::DEFAULT_TIME_LIMIT,
            clock_check_interval: SolverConfig::DEFAULT_CLOCK_CHECK_INTERVAL,
            node_limit: None,
            threads: 1,
            zero_revenue_policy: ZeroRevenuePolicy::default(),
            log_interval: None,
            interrupt: None,
        }
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Values below one are clamped to one.
    #[inline]
    pub fn with_clock_check_interval(mut self, interval: u64) -> Self {
        self.clock_check_interval = interval.max(1);
        self
    }

    #[inline]
    pub fn with_node_limit(mut self, limit: u64) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Worker threads for the root split. Zero is treated as one.
    #[inline]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    #[inline]
    pub fn with_zero_revenue_policy(mut self, policy: ZeroRevenuePolicy) -> Self {
        self.zero_revenue_policy = policy;
        self
    }

    #[inline]
    pub fn with_log_interval(mut self, interval: Duration) -> Self {
        self.log_interval = Some(interval);
        self
    }

    #[inline]
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    #[inline]
    pub fn build(self) -> SolverConfig {
        SolverConfig {
            time_limit: self.time_limit,
            clock_check_interval: self.clock_check_interval,
            node_limit: self.node_limit,
            threads: self.threads,
            zero_revenue_policy: self.zero_revenue_policy,
            log_interval: self.log_interval,
            interrupt: self.interrupt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SolverConfig::default();
        assert_eq!(config.time_limit(), Duration::from_secs(30));
        assert_eq!(config.clock_check_interval(), 1024);
        assert_eq!(config.node_limit(), None);
        assert_eq!(config.threads(), 1);
        assert_eq!(config.zero_revenue_policy(), ZeroRevenuePolicy::LeaveUnassigned);
        assert!(config.log_interval().is_none());
        assert!(config.interrupt().is_none());
    }

    #[test]
    fn test_builder_clamps_degenerate_values() {
        let config = SolverConfig::builder()
            .with_threads(0)
            .with_clock_check_interval(0)
            .build();
        assert_eq!(config.threads(), 1);
        assert_eq!(config.clock_check_interval(), 1);
    }

    #[test]
    fn test_interrupt_flag_is_shared() {
        use std::sync::atomic::Ordering;

        let flag = Arc::new(AtomicBool::new(false));
        let config = SolverConfig::builder().with_interrupt(flag.clone()).build();
        flag.store(true, Ordering::Relaxed);
        assert_eq!(config.interrupt().map(|f| f.load(Ordering::Relaxed)), Some(true));
    }
}
