use crate::config::NavigationConfig;
use crate::detect::analysis::{
    DescribedObject, Describer, DetectedObjectDescriber, GuideData, WarningDescriber,
};
use crate::detect::property::direction::PositionGroup;
use crate::detect::property::distance::DistanceClassifier;
use crate::detect::property::geometry::FrameContext;
use crate::detect::ranker::ScoredObject;
use crate::detect::NO_HAZARD_MESSAGE;

/// Turns the ranked objects of a frame into one utterance for the speech synthesizer.
pub struct NavigationTextGenerator {
    describers: Vec<Box<dyn Describer + Send + Sync>>,
    classifier: DistanceClassifier,
    no_hazard_message: String,
}

impl Default for NavigationTextGenerator {
    fn default() -> Self {
        Self::new(DistanceClassifier::default(), NO_HAZARD_MESSAGE)
    }
}

impl NavigationTextGenerator {
    pub fn new(classifier: DistanceClassifier, no_hazard_message: impl Into<String>) -> Self {
        // Define the order in which the sentence parts are generated
        let describers: Vec<Box<dyn Describer + Send + Sync>> = vec![
            Box::new(WarningDescriber),
            Box::new(DetectedObjectDescriber),
        ];
        Self {
            describers,
            classifier,
            no_hazard_message: no_hazard_message.into(),
        }
    }

    pub fn from_config(config: &NavigationConfig) -> Self {
        Self::new(
            DistanceClassifier::from_config(&config.distance),
            config.no_hazard_message.clone(),
        )
    }

    pub fn no_hazard_message(&self) -> &str {
        &self.no_hazard_message
    }

    /// Assigns distance band and position group to each ranked object, keeping the order.
    pub fn describe_objects<'a>(
        &self,
        ranked: &[ScoredObject<'a>],
        frame: &FrameContext,
    ) -> Vec<DescribedObject<'a>> {
        ranked
            .iter()
            .map(|scored| DescribedObject {
                scored: *scored,
                distance: self.classifier.classify(scored.object.depth),
                position: PositionGroup::get_position(
                    scored.object.bounding_box.center_x(),
                    frame,
                ),
            })
            .collect()
    }

    pub fn generate(&self, ranked: &[ScoredObject], frame: &FrameContext) -> String {
        let data = GuideData {
            objects: self.describe_objects(ranked, frame),
        };
        self.compose(&data)
    }

    /// Joins the parts of all describers with spaces. Nothing to say yields the no-hazard message.
    pub fn compose(&self, data: &GuideData) -> String {
        let mut parts: Vec<String> = Vec::new();

        for describer in &self.describers {
            if let Some(part) = describer.describe(data) {
                if !part.trim().is_empty() {
                    parts.push(part.trim().to_string());
                }
            }
        }

        if parts.is_empty() {
            return self.no_hazard_message.clone();
        }

        if let Some(first_part) = parts.first_mut() {
            let mut c = first_part.chars();
            if let Some(f) = c.next() {
                *first_part = f.to_uppercase().collect::<String>() + c.as_str();
            }
        }

        let mut sentence = parts.join(" ");
        if !sentence.ends_with(|c: char| c == '.' || c == '!') {
            sentence.push('.');
        }

        sentence
    }
}
