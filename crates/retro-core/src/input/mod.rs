//! Controller input primitives.
//!
//! - **`keys`**   – [`KeyMask`], the per-frame button bitmask.
//! - **`repeat`** – [`RepeatController`], which accelerates key repeat while a
//!   key set stays held.
//!
//! Neither module talks to a device.  The launcher polls the platform input
//! layer and feeds the results in here once per frame.

pub mod keys;
pub mod repeat;

pub use keys::KeyMask;
pub use repeat::RepeatController;
