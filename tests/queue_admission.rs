use matrixd::engine::{Admission, JobQueue};
use matrixd::task::{AssetCatalog, Priority, Task};

fn catalog() -> AssetCatalog {
    AssetCatalog::from_dirs("fonts", "animations", "images/emojis")
}

fn text(s: &str) -> Task {
    Task::text(s.to_string(), None, &catalog())
}

#[test]
fn normal_admissions_preserve_fifo_order() {
    let mut q = JobQueue::new(50);

    assert_eq!(q.admit(text("A"), Priority::Normal, true), Admission::Enqueued);
    assert_eq!(q.admit(text("B"), Priority::Normal, true), Admission::Enqueued);
    assert_eq!(q.admit(text("C"), Priority::Normal, true), Admission::Enqueued);

    assert_eq!(q.pop_next(), Some(text("A")));
    assert_eq!(q.pop_next(), Some(text("B")));
    assert_eq!(q.pop_next(), Some(text("C")));
    assert_eq!(q.pop_next(), None);
}

#[test]
fn high_priority_replaces_entire_queue_and_requests_preemption() {
    let mut q = JobQueue::new(50);

    q.admit(text("A"), Priority::Normal, true);
    q.admit(text("B"), Priority::Normal, true);

    assert_eq!(q.admit(text("urgent"), Priority::High, true), Admission::Preempt);

    assert_eq!(q.len(), 1);
    assert_eq!(q.pop_next(), Some(text("urgent")));
    assert!(q.is_empty());
}

#[test]
fn low_priority_is_dropped_while_busy() {
    let mut q = JobQueue::new(50);

    q.admit(text("A"), Priority::Normal, true);
    let before = q.len();

    assert_eq!(q.admit(text("filler"), Priority::Low, true), Admission::DroppedBusy);
    assert_eq!(q.len(), before);
}

#[test]
fn low_priority_is_admitted_while_idle() {
    let mut q = JobQueue::new(50);

    assert_eq!(q.admit(text("filler"), Priority::Low, false), Admission::Enqueued);
    assert_eq!(q.pop_next(), Some(text("filler")));
}

#[test]
fn exceeding_the_cap_flushes_everything() {
    let mut q = JobQueue::new(50);

    for i in 0..50 {
        let admission = q.admit(text(&format!("job-{i}")), Priority::Normal, true);
        assert_eq!(admission, Admission::Enqueued);
    }
    assert_eq!(q.len(), 50);

    // The 51st admission crosses the cap: not a 50-length queue with one
    // entry shed, but an empty queue.
    assert_eq!(q.admit(text("straw"), Priority::Normal, true), Admission::Overflowed);
    assert!(q.is_empty());
    assert_eq!(q.pop_next(), None);
}

#[test]
fn cap_is_clamped_to_at_least_one() {
    let mut q = JobQueue::new(0);

    assert_eq!(q.admit(text("A"), Priority::Normal, false), Admission::Enqueued);
    assert_eq!(q.len(), 1);

    assert_eq!(q.admit(text("B"), Priority::Normal, false), Admission::Overflowed);
    assert!(q.is_empty());
}

#[test]
fn clear_empties_the_queue() {
    let mut q = JobQueue::new(50);

    q.admit(text("A"), Priority::Normal, true);
    q.admit(text("B"), Priority::Normal, true);

    q.clear();
    assert!(q.is_empty());
    assert_eq!(q.pop_next(), None);
}
