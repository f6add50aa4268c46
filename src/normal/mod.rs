//! Normal map construction, storage encoding and comparison.
pub mod codec;
pub mod compare;
pub mod light;
pub mod map;
pub mod reconstruct;

pub use self::codec::{decode, encode, Depth, EncodedMap};
pub use self::compare::{compare, equivalent, planes_equivalent, Equivalence};
pub use self::light::apply_light;
pub use self::map::NormalMap;
pub use self::reconstruct::{reconstruct, ReconstructOptions, ZClosure};
