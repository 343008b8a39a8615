/// Type-A symmetric pairing over a supersingular curve.
pub mod type_a;

pub use type_a::TypeA;
