pub mod bitmask_flags;
pub mod constants;
pub mod distance;
pub mod grab;
pub mod pointer;
pub mod rapier_world;
pub mod ray_builder;
pub mod scene;
pub mod settings;
pub mod surface;
pub mod types;

pub use bitmask_flags::{BitmaskFlags, FlagBitmask, LayerMask};
pub use constants::{MIN_GRAB_DISTANCE, THROW_SCALE};
pub use grab::{GrabController, GrabPredicate, GrabSession, TagPredicate};
pub use pointer::{ArcPointer, DynPointer, LaserPointer, Pointer};
pub use rapier_world::{BodyKind, ColliderShapeDef, PropDef, RapierScene};
pub use ray_builder::{ArcRay, CastPlan, LaserRay, RayBuilder, SkipReason};
pub use scene::{Scene, SceneError};
pub use settings::{ArcSettings, GrabSettings, LaserSettings, SettingsError};
pub use types::{
    ActiveController, AnchorPose, ButtonState, EntityHandle, GrabEvent, Point3, PointerInput,
    PointerState, Ray, RayHit, TickReport, TrackedAnchors, Vec2, Vec3,
};
