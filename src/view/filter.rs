use crate::database::{Match, Player, Tournament};

/// Players whose full name has a word starting with `term`, ignoring case.
/// Blank terms keep everyone.
pub fn filter_players(players: &[Player], term: &str) -> Vec<Player> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return players.to_vec();
    }

    players
        .iter()
        .filter(|player| matches_at_word_start(&player.full_name().to_lowercase(), &needle))
        .cloned()
        .collect()
}

fn matches_at_word_start(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(at, _)| {
        haystack[..at]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

/// Matches whose team labels mention the player's first or last name.
///
/// Plain substring matching: two players sharing a name share matches.
pub fn matches_for_player(player: &Player, matches: &[Match]) -> Vec<Match> {
    let names: Vec<String> = [&player.first_name, &player.last_name]
        .into_iter()
        .map(|name| name.trim().to_lowercase())
        .filter(|name| !name.is_empty())
        .collect();

    matches
        .iter()
        .filter(|m| {
            let teams = [m.pair_one.to_lowercase(), m.pair_two.to_lowercase()];
            teams
                .iter()
                .any(|team| names.iter().any(|name| team.contains(name.as_str())))
        })
        .cloned()
        .collect()
}

/// Tournaments named by at least one of `matches`.
pub fn tournaments_for_player(matches: &[Match], tournaments: &[Tournament]) -> Vec<Tournament> {
    tournaments
        .iter()
        .filter(|t| matches.iter().any(|m| m.tournament.as_deref() == Some(t.name.as_str())))
        .cloned()
        .collect()
}

/// What the detail modal shows for one player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDetail {
    pub player: Player,
    pub matches: Vec<Match>,
    pub tournaments: Vec<Tournament>,
}

pub fn player_detail(player: &Player, matches: &[Match], tournaments: &[Tournament]) -> PlayerDetail {
    let matches = matches_for_player(player, matches);
    let tournaments = tournaments_for_player(&matches, tournaments);

    PlayerDetail {
        player: player.clone(),
        matches,
        tournaments,
    }
}
