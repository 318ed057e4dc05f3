//! Crawl frontier: pending queue, visited set, and page budget
//!
//! The frontier is strict FIFO, so traversal is breadth-first. A URL is
//! enqueued only if it is neither already visited nor already pending, and
//! the visited set never grows past the page budget.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO work queue with duplicate suppression and a visit budget
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<Url>,
    pending: HashSet<String>,
    visited: HashSet<String>,
    page_budget: usize,
}

impl Frontier {
    /// Creates a frontier seeded with a single URL
    pub fn new(seed: Url, page_budget: usize) -> Self {
        let mut pending = HashSet::new();
        pending.insert(seed.as_str().to_string());

        let mut queue = VecDeque::new();
        queue.push_back(seed);

        Self {
            queue,
            pending,
            visited: HashSet::new(),
            page_budget,
        }
    }

    /// True once the budget of visited URLs is exhausted
    pub fn budget_reached(&self) -> bool {
        self.visited.len() >= self.page_budget
    }

    /// Pops the next pending URL, or `None` when the queue is empty
    pub fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.pending.remove(url.as_str());
        Some(url)
    }

    /// Marks a URL as visited; returns false if it was already visited
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.visited.insert(url.as_str().to_string())
    }

    /// Enqueues a URL unless it is already visited or already pending
    ///
    /// Returns true if the URL was accepted into the queue.
    pub fn enqueue(&mut self, url: Url) -> bool {
        let key = url.as_str();
        if self.visited.contains(key) || self.pending.contains(key) {
            return false;
        }

        self.pending.insert(key.to_string());
        self.queue.push_back(url);
        true
    }

    /// The configured page budget
    pub fn budget(&self) -> usize {
        self.page_budget
    }

    /// Number of URLs visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs still pending
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }
}
