pub mod clock;
pub mod constants;
pub mod effects;
pub mod game_loop;
pub mod match_result;
pub mod mode;
pub mod request;
pub mod snapshot;
pub mod state;
pub mod systems;
