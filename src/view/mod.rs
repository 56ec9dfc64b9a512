pub mod filter;
pub mod format;
pub mod render;
pub mod state;

pub use filter::{filter_players, matches_for_player, player_detail, tournaments_for_player, PlayerDetail};
pub use render::render_dashboard;
pub use state::{DashboardView, ReadyView, Tab};
