use crate::detect::analysis::{DescribedObject, Describer, GuideData};
use crate::detect::property::direction::PositionGroup;
use crate::detect::property::distance::DistanceBand;
use std::fmt::Write;

#[derive(Debug, Copy, Clone)]
pub struct DetectedObjectDescriber;

/// Objects sharing a spoken label, distance band and position, spoken as one clause.
#[derive(Debug, Clone, PartialEq)]
struct Mention {
    label: String,
    distance: DistanceBand,
    position: PositionGroup,
    count: usize,
}

/// Label as it should be spoken: trimmed, underscores read as spaces.
fn spoken_label(label: &str) -> String {
    label.trim().replace('_', " ")
}

fn article(label: &str) -> &'static str {
    match label.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// Merges duplicates, keeping the order of first appearance.
fn mentions(objects: &[DescribedObject]) -> Vec<Mention> {
    let mut mentions: Vec<Mention> = Vec::with_capacity(objects.len());
    for obj in objects {
        let label = spoken_label(&obj.scored.object.label);
        let same = mentions.iter_mut().find(|m| {
            m.label.eq_ignore_ascii_case(&label)
                && m.distance == obj.distance
                && m.position == obj.position
        });
        match same {
            Some(mention) => mention.count += 1,
            None => mentions.push(Mention {
                label,
                distance: obj.distance,
                position: obj.position,
                count: 1,
            }),
        }
    }
    mentions
}

/// "a car (very close) directly ahead", or "2 persons (quite close) to the left".
fn clause(mention: &Mention) -> String {
    match mention.count {
        1 => format!(
            "{} {} ({}) {}",
            article(&mention.label),
            mention.label,
            mention.distance,
            mention.position
        ),
        n => format!(
            "{} {}s ({}) {}",
            n, mention.label, mention.distance, mention.position
        ),
    }
}

impl Describer for DetectedObjectDescriber {
    fn describe(&self, data: &GuideData) -> Option<String> {
        let clauses: Vec<String> = mentions(&data.objects).iter().map(clause).collect();
        let verb = if data.objects.len() == 1 { "is" } else { "are" };

        let mut description = String::new();
        match clauses.as_slice() {
            [] => return None,
            [only] => write!(description, "There {} {}.", verb, only).ok()?,
            [rest @ .., last] => {
                write!(description, "There are {} and {}.", rest.join(", "), last).ok()?
            }
        }

        Some(description)
    }
}
