pub mod classifier;
pub mod types;

pub use classifier::{angular_separation, sort_by_orb, AspectClassifier};
pub use types::{
    Aspect, AspectDefinition, AspectKind, AspectMatch, AspectTable, SynastryAspect, TransitAspect,
};
