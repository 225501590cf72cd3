use crate::detect::analysis::{Describer, GuideData};

#[derive(Debug, Copy, Clone)]
pub struct WarningDescriber;

impl Describer for WarningDescriber {
    fn describe(&self, data: &GuideData) -> Option<String> {
        // Any very close or quite close object makes the whole utterance a warning.
        data.objects
            .iter()
            .any(|obj| obj.distance.is_warning())
            .then(|| "Warning!".to_string())
    }
}
