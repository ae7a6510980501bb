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

use std::time::Duration;

/// Aggregate statistics for one solve across all workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverStatistics {
    /// Total solutions installed across all workers.
    pub solutions_found: u64,
    /// Total nodes explored across all workers.
    pub nodes_explored: u64,
    /// Number of worker threads used.
    pub used_threads: usize,
    /// Wall-clock duration of the solve.
    pub solve_duration: Duration,
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SolverStatistics(solutions: {}, nodes: {}, threads: {}, duration: {:.2?})",
            self.solutions_found, self.nodes_explored, self.used_threads, self.solve_duration
        )
    }
}

/// Builder for `SolverStatistics`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolverStatisticsBuilder {
    statistics: SolverStatistics,
}

impl SolverStatisticsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn solutions_found(mut self, solutions_found: u64) -> Self {
        self.statistics.solutions_found = solutions_found;
        self
    }

    #[inline]
    pub fn nodes_explored(mut self, nodes_explored: u64) -> Self {
        self.statistics.nodes_explored = nodes_explored;
        self
    }

    #[inline]
    pub fn used_threads(mut self, used_threads: usize) -> Self {
        self.statistics.used_threads = used_threads;
        self
    }

    #[inline]
    pub fn solve_duration(mut self, solve_duration: Duration) -> Self {
        self.statistics.solve_duration = solve_duration;
        self
    }

    #[inline]
    pub fn build(self) -> SolverStatistics {
        self.statistics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_all_fields() {
        let stats = SolverStatisticsBuilder::new()
            .solutions_found(3)
            .nodes_explored(120)
            .used_threads(2)
            .solve_duration(Duration::from_millis(5))
            .build();

        assert_eq!(stats.solutions_found, 3);
        assert_eq!(stats.nodes_explored, 120);
        assert_eq!(stats.used_threads, 2);
        assert_eq!(stats.solve_duration, Duration::from_millis(5));
    }
}
