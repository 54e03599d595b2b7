use std::time::Duration;

use tokio::time::sleep;

/// Sequential 1-based page numbers with a fixed pause between pages.
/// No pause before the first page or after the last.
#[derive(Debug, Clone)]
pub struct PageSchedule {
    next: u32,
    max_pages: u32,
    delay: Duration,
}

impl PageSchedule {
    pub fn new(max_pages: u32, delay: Duration) -> Self {
        Self {
            next: 1,
            max_pages,
            delay,
        }
    }

    /// Wait out the inter-page delay (if any) and yield the next page.
    pub async fn next_page(&mut self) -> Option<u32> {
        if self.next > self.max_pages {
            return None;
        }
        if self.next > 1 && !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        let page = self.next;
        self.next += 1;
        Some(page)
    }
}

/// Clamp a caller-supplied page count into `[1, upper_bound]`.
pub fn clamp_pages(requested: u32, upper_bound: u32) -> u32 {
    requested.clamp(1, upper_bound.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn delays_only_between_pages() {
        let start = Instant::now();
        let mut schedule = PageSchedule::new(3, Duration::from_secs(1));

        assert_eq!(schedule.next_page().await, Some(1));
        assert_eq!(start.elapsed(), Duration::ZERO);

        assert_eq!(schedule.next_page().await, Some(2));
        assert_eq!(schedule.next_page().await, Some(3));
        assert_eq!(schedule.next_page().await, None);
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test]
    async fn zero_pages_yields_nothing() {
        let mut schedule = PageSchedule::new(0, Duration::ZERO);
        assert_eq!(schedule.next_page().await, None);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_pages(0, 5), 1);
        assert_eq!(clamp_pages(3, 5), 3);
        assert_eq!(clamp_pages(9, 5), 5);
        assert_eq!(clamp_pages(2, 0), 1);
    }
}
