pub mod arena;
pub mod clones;
pub mod combat;
pub mod orbs;
pub mod physics;
pub mod targeting;
