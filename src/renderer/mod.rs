//! Text rendering module
//!
//! Raycasts the maze from the player's eye into a grid of characters. Rendering
//! never mutates game state; pinning the victory frame is done by the engine.

pub mod frame;
pub mod overlay;
pub mod raycast;
pub mod shading;
pub mod view;

pub use frame::{Frame, Viewport};
pub use raycast::{RayHit, Side, cast_ray};
pub use shading::Shader;
pub use view::render;
