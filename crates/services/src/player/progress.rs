/// Aggregated view of course-player progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerProgress {
    pub percent: u8,
    pub completed: bool,
    pub current_index: usize,
    pub total_lessons: usize,
}
