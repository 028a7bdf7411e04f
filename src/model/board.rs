use super::layers::Layers;
use super::residents::ResidentList;

/// Everything a facility's schedule consists of
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    /// Master pattern, date overrides and week footers
    pub layers: Layers,
    pub residents: ResidentList,
    /// Free-form "updated on" label shown on the printed sheet
    pub update_label: String,
    pub facility_name: String,
}
