pub mod physics;
pub mod psf;

pub use physics::LensPhysics;
pub use psf::PsfKernel;
