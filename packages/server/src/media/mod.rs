mod links;
pub mod reconcile;
pub mod registry;

pub use reconcile::{AssociationReconciler, MediaLink, ReconcileOutcome};
pub use registry::{MediaAssetChanges, MediaRegistry, NewMediaAsset};
