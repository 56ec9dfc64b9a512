use std::fmt;
use std::str::FromStr;

use super::filter::{filter_players, player_detail, PlayerDetail};
use crate::client::DashboardData;
use crate::database::Player;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Players,
    Matches,
    Tournaments,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Players, Tab::Matches, Tab::Tournaments];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::Players => "jugadores",
            Tab::Matches => "partidos",
            Tab::Tournaments => "torneos",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jugadores" | "players" => Ok(Tab::Players),
            "partidos" | "matches" => Ok(Tab::Matches),
            "torneos" | "tournaments" => Ok(Tab::Tournaments),
            other => Err(format!("Pestaña desconocida: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadyView {
    pub data: DashboardData,
    pub tab: Tab,
    pub search: String,
    pub visible_players: Vec<Player>,
    pub selected: Option<Player>,
}

/// Dashboard screen. Leaves `Loading` once, on the first load.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DashboardView {
    #[default]
    Loading,
    Ready(ReadyView),
}

impl DashboardView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later loads are ignored.
    pub fn load(&mut self, data: DashboardData) {
        if let DashboardView::Loading = self {
            let visible_players = data.players.clone();
            *self = DashboardView::Ready(ReadyView {
                data,
                tab: Tab::default(),
                search: String::new(),
                visible_players,
                selected: None,
            });
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardView::Ready(_))
    }

    pub fn ready(&self) -> Option<&ReadyView> {
        match self {
            DashboardView::Ready(view) => Some(view),
            DashboardView::Loading => None,
        }
    }

    fn ready_mut(&mut self) -> Option<&mut ReadyView> {
        match self {
            DashboardView::Ready(view) => Some(view),
            DashboardView::Loading => None,
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if let Some(view) = self.ready_mut() {
            view.tab = tab;
        }
    }

    /// Records the term. Visible players change only on `apply_filter`.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        if let Some(view) = self.ready_mut() {
            view.search = term.into();
        }
    }

    pub fn apply_filter(&mut self) {
        if let Some(view) = self.ready_mut() {
            view.visible_players = filter_players(&view.data.players, &view.search);
        }
    }

    pub fn select_player(&mut self, player: Player) {
        if let Some(view) = self.ready_mut() {
            view.selected = Some(player);
        }
    }

    /// Opens the modal for the `index`-th visible player; false if out of range.
    pub fn select_visible(&mut self, index: usize) -> bool {
        let Some(view) = self.ready_mut() else {
            return false;
        };
        match view.visible_players.get(index).cloned() {
            Some(player) => {
                view.selected = Some(player);
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        if let Some(view) = self.ready_mut() {
            view.selected = None;
        }
    }

    pub fn modal(&self) -> Option<PlayerDetail> {
        let view = self.ready()?;
        let player = view.selected.as_ref()?;
        Some(player_detail(player, &view.data.matches, &view.data.tournaments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::filter::fixtures::*;

    fn data() -> DashboardData {
        DashboardData {
            stats: None,
            players: vec![player(1, "Ana", "Lopez"), player(2, "Juan", "Perez")],
            matches: vec![game(1, "Ana Lopez / X", "Y", Some("Apertura"))],
            tournaments: vec![tournament(1, "Apertura")],
        }
    }

    #[test]
    fn test_operations_before_ready_are_ignored() {
        let mut view = DashboardView::new();

        view.select_tab(Tab::Matches);
        view.set_search_term("ana");
        assert!(!view.select_visible(0));
        assert_eq!(view, DashboardView::Loading);
        assert!(view.modal().is_none());
    }

    #[test]
    fn test_load_is_terminal() {
        let mut view = DashboardView::new();
        view.load(data());
        view.select_tab(Tab::Tournaments);

        view.load(DashboardData::default());

        let ready = view.ready().unwrap();
        assert_eq!(ready.tab, Tab::Tournaments);
        assert_eq!(ready.visible_players.len(), 2);
    }

    #[test]
    fn test_search_applies_on_filter() {
        let mut view = DashboardView::new();
        view.load(data());

        view.set_search_term("an");
        assert_eq!(view.ready().unwrap().visible_players.len(), 2);

        view.apply_filter();
        assert_eq!(view.ready().unwrap().visible_players, vec![player(1, "Ana", "Lopez")]);

        view.set_search_term("");
        view.apply_filter();
        assert_eq!(view.ready().unwrap().visible_players.len(), 2);
    }

    #[test]
    fn test_modal_open_and_close() {
        let mut view = DashboardView::new();
        view.load(data());

        assert!(view.select_visible(0));
        let detail = view.modal().unwrap();
        assert_eq!(detail.player.id, 1);
        assert_eq!(detail.matches.len(), 1);
        assert_eq!(detail.tournaments.len(), 1);

        view.select_tab(Tab::Matches);
        assert!(view.modal().is_some());

        view.close_modal();
        assert!(view.modal().is_none());
        assert!(!view.select_visible(5));
    }

    #[test]
    fn test_tab_parsing() {
        assert_eq!("Partidos".parse::<Tab>().unwrap(), Tab::Matches);
        assert_eq!("tournaments".parse::<Tab>().unwrap(), Tab::Tournaments);
        assert!("ranking".parse::<Tab>().is_err());
    }
}
