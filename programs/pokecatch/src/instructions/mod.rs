pub mod admin;
pub mod consume_randomness;
pub mod deposit_nft;
pub mod despawn_pokemon;
pub mod force_spawn_pokemon;
pub mod initialize;
pub mod purchase_balls;
pub mod reposition_pokemon;
pub mod spawn_pokemon;
pub mod throw_ball;
pub mod withdraw_nft;
pub mod withdraw_revenue;

pub use admin::*;
pub use consume_randomness::*;
pub use deposit_nft::*;
pub use despawn_pokemon::*;
pub use force_spawn_pokemon::*;
pub use initialize::*;
pub use purchase_balls::*;
pub use reposition_pokemon::*;
pub use spawn_pokemon::*;
pub use throw_ball::*;
pub use withdraw_nft::*;
pub use withdraw_revenue::*;
