pub mod analysis;
pub mod consts;
pub mod detection;
pub mod error;
pub mod grid;
pub mod imaging;
pub mod io;
pub mod lens;
pub mod pipeline;
pub mod planet;
pub mod synth;
