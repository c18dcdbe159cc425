/// Furthest stage a tracking cycle reached.
///
/// Stages are ordered, so `stage >= CycleStage::Contoured` reads as
/// "a dominant contour was found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum CycleStage {
    /// Nothing computed yet
    #[default]
    Idle,
    /// Foreground mask computed
    Segmented,
    /// Dominant contour selected
    Contoured,
    /// Hull and centroid computed
    Hulled,
    /// Fingertips extracted and gesture labelled
    Classified,
}
