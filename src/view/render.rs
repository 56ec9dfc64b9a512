use chrono::NaiveDate;
use colored::{Color, ColoredString, Colorize};

use super::filter::PlayerDetail;
use super::format::{
    format_age, format_date, initials, or_default, status_label, StatusKind, NOT_AVAILABLE,
};
use super::state::{DashboardView, ReadyView, Tab};
use crate::database::{Match, Player, Stats, Tournament};

const TITLE: &str = "Torneos Nueva Temporada";

/// Text rendering of the whole screen, modal included.
pub fn render_dashboard(view: &DashboardView, user_name: &str, today: NaiveDate) -> String {
    let Some(ready) = view.ready() else {
        return "Cargando...".dimmed().to_string();
    };

    let mut lines = header(user_name);
    lines.push(stat_cards(ready.data.stats.as_ref(), ready.tab));
    lines.push(String::new());

    match ready.tab {
        Tab::Players => lines.extend(players_section(ready, today)),
        Tab::Matches => lines.extend(matches_section(&ready.data.matches)),
        Tab::Tournaments => lines.extend(tournaments_section(&ready.data.tournaments)),
    }

    if let Some(detail) = view.modal() {
        lines.push(String::new());
        lines.extend(render_modal(&detail, today));
    }

    lines.join("\n")
}

fn header(user_name: &str) -> Vec<String> {
    vec![
        TITLE.bold().to_string(),
        format!("Hola, {user_name}"),
        String::new(),
    ]
}

fn stat_cards(stats: Option<&Stats>, active: Tab) -> String {
    let value = |pick: fn(&Stats) -> i64| stats.map(pick).unwrap_or(0);

    Tab::ALL
        .iter()
        .map(|tab| {
            let (label, count) = match tab {
                Tab::Players => ("Total Jugadores", value(|s| s.total_jugadores)),
                Tab::Matches => ("Total Partidos", value(|s| s.total_partidos)),
                Tab::Tournaments => ("Total Torneos", value(|s| s.total_torneos)),
            };
            let card = format!("[ {label}: {count} ]");
            if *tab == active {
                card.blue().bold().to_string()
            } else {
                card
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn section_title(title: &str) -> String {
    title.bold().underline().to_string()
}

fn empty_state(message: &str) -> String {
    format!("  {}", message.dimmed())
}

fn players_section(view: &ReadyView, today: NaiveDate) -> Vec<String> {
    let mut lines = vec![section_title("Jugadores Registrados")];
    if !view.search.trim().is_empty() {
        lines.push(format!("Buscar: {}", view.search));
        lines.push(format!("{} resultado(s)", view.visible_players.len()));
    }

    if view.visible_players.is_empty() {
        lines.push(empty_state("No se encontraron jugadores."));
        return lines;
    }

    for (index, player) in view.visible_players.iter().enumerate() {
        lines.push(player_card(index + 1, player, today));
    }
    lines
}

pub fn player_card(position: usize, player: &Player, today: NaiveDate) -> String {
    format!(
        "{:>3}. ({}) {}  {}  Edad: {}",
        position,
        initials(&player.first_name, &player.last_name).bold(),
        player.full_name(),
        format!("#{}", player.ranking).yellow(),
        format_age(player.birth_date, today)
    )
}

fn matches_section(matches: &[Match]) -> Vec<String> {
    let mut lines = vec![section_title("Partidos Registrados")];
    if matches.is_empty() {
        lines.push(empty_state("No hay partidos registrados."));
        return lines;
    }

    for game in matches {
        lines.extend(match_card(game));
        lines.push(String::new());
    }
    lines
}

fn status_badge(status: Option<&str>) -> ColoredString {
    let label = format!("[{}]", status_label(status));
    label.color(status_color(StatusKind::of(status)))
}

fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::Completed => Color::Blue,
        StatusKind::InProgress => Color::Green,
        StatusKind::Other => Color::Yellow,
    }
}

pub fn match_card(game: &Match) -> Vec<String> {
    vec![
        format!(
            "  {}  {}",
            format_date(game.date),
            status_badge(game.status.as_deref())
        ),
        format!("  {} VS {}", game.pair_one.bold(), game.pair_two.bold()),
        format!("  {}", or_default(game.court.as_deref(), "Por definir")),
        format!("  {}", or_default(game.tournament.as_deref(), "Sin torneo")),
        format!(
            "  {} - {}",
            or_default(game.start_time.as_deref(), "--:--"),
            or_default(game.end_time.as_deref(), "--:--")
        ),
        format!(
            "  Fase: {} | Zona {}",
            or_default(game.phase.as_deref(), NOT_AVAILABLE),
            or_default(game.zone.as_deref(), NOT_AVAILABLE)
        ),
    ]
}

fn tournaments_section(tournaments: &[Tournament]) -> Vec<String> {
    let mut lines = vec![section_title("Torneos Disponibles")];
    if tournaments.is_empty() {
        lines.push(empty_state("No hay torneos registrados."));
        return lines;
    }

    for tournament in tournaments {
        lines.extend(tournament_card(tournament));
        lines.push(String::new());
    }
    lines
}

pub fn tournament_card(tournament: &Tournament) -> Vec<String> {
    let mut lines = vec![
        format!("  {}", tournament.name.bold()),
        format!("  Estado: {}", tournament.status),
        format!("  Máx Parejas: {}", tournament.max_pairs),
    ];
    if let Some(rules) = tournament.rules.as_deref().filter(|r| !r.trim().is_empty()) {
        lines.push(format!("  Reglamento: {}", rules.dimmed()));
    }
    lines
}

pub fn render_modal(detail: &PlayerDetail, today: NaiveDate) -> Vec<String> {
    let player = &detail.player;
    let mut lines = vec![
        "=".repeat(48),
        format!(
            "{}  {}  {}",
            player.full_name().bold(),
            format!("#{}", player.ranking).yellow(),
            format_age(player.birth_date, today)
        ),
        String::new(),
        section_title("Información Personal"),
        format!("  Email: {}", or_default(player.email.as_deref(), "Sin correo")),
        format!("  Teléfono: {}", or_default(player.phone.as_deref(), "Sin teléfono")),
        format!("  Nacimiento: {}", format_date(player.birth_date)),
        format!("  Ranking: #{}", player.ranking),
        String::new(),
        section_title(&format!("Partidos ({})", detail.matches.len())),
    ];

    if detail.matches.is_empty() {
        lines.push(empty_state("No hay partidos registrados."));
    }
    for game in &detail.matches {
        lines.push(format!(
            "  {} VS {}  {}",
            game.pair_one,
            game.pair_two,
            status_badge(game.status.as_deref())
        ));
        lines.push(format!(
            "    {} | {} | {}",
            format_date(game.date),
            or_default(game.court.as_deref(), "Por definir"),
            or_default(game.tournament.as_deref(), "Sin torneo")
        ));
    }

    lines.push(String::new());
    lines.push(section_title(&format!("Torneos ({})", detail.tournaments.len())));
    if detail.tournaments.is_empty() {
        lines.push(empty_state("No hay torneos registrados."));
    }
    for tournament in &detail.tournaments {
        lines.push(format!("  {} ({})", tournament.name, tournament.status));
    }

    lines.push(String::new());
    lines.push(":close para cerrar".dimmed().to_string());
    lines.push("=".repeat(48));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DashboardData;
    use crate::view::filter::fixtures::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn plain() {
        colored::control::set_override(false);
    }

    fn ready_view() -> DashboardView {
        let mut ana = player(1, "Ana", "Lopez");
        ana.birth_date = NaiveDate::from_ymd_opt(1994, 3, 12);
        ana.email = Some("ana@club.com".into());

        let mut view = DashboardView::new();
        view.load(DashboardData {
            stats: Some(Stats {
                total_jugadores: 2,
                total_partidos: 1,
                total_torneos: 1,
            }),
            players: vec![ana, player(2, "Juan", "Perez")],
            matches: vec![game(1, "Ana Lopez / X", "Y / Z", Some("Apertura"))],
            tournaments: vec![tournament(1, "Apertura")],
        });
        view
    }

    #[test]
    fn test_loading_screen() {
        plain();
        assert_eq!(render_dashboard(&DashboardView::new(), "Ana", today()), "Cargando...");
    }

    #[test]
    fn test_players_tab_with_counter() {
        plain();
        let mut view = ready_view();
        view.set_search_term("an");
        view.apply_filter();

        let out = render_dashboard(&view, "Ana", today());
        assert!(out.contains("Hola, Ana"));
        assert!(out.contains("[ Total Jugadores: 2 ]"));
        assert!(out.contains("1 resultado(s)"));
        assert!(out.contains("(AL) Ana Lopez  #1  Edad: 30 años"));
        assert!(!out.contains("Juan Perez"));
    }

    #[test]
    fn test_missing_stats_show_zero_and_empty_states() {
        plain();
        let mut view = DashboardView::new();
        view.load(DashboardData::default());

        let out = render_dashboard(&view, "Invitado", today());
        assert!(out.contains("[ Total Partidos: 0 ]"));
        assert!(out.contains("No se encontraron jugadores."));

        view.select_tab(Tab::Tournaments);
        let out = render_dashboard(&view, "Invitado", today());
        assert!(out.contains("No hay torneos registrados."));
    }

    #[test]
    fn test_match_card_defaults() {
        plain();
        let card = match_card(&game(1, "A", "B", None)).join("\n");

        assert!(card.contains("N/A  [Pendiente]"));
        assert!(card.contains("Por definir"));
        assert!(card.contains("Sin torneo"));
        assert!(card.contains("--:-- - --:--"));
        assert!(card.contains("Fase: N/A | Zona N/A"));
    }

    #[test]
    fn test_each_status_kind_has_its_own_color() {
        let colors = [
            status_color(StatusKind::Completed),
            status_color(StatusKind::InProgress),
            status_color(StatusKind::Other),
        ];

        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }

    #[test]
    fn test_tournament_card_shows_rules_when_present() {
        plain();
        let mut with_rules = tournament(1, "Apertura");
        with_rules.rules = Some("Mejor de tres sets".into());

        assert!(tournament_card(&with_rules).join("\n").contains("Reglamento: Mejor de tres sets"));
        assert!(!tournament_card(&tournament(2, "Clausura")).join("\n").contains("Reglamento"));
    }

    #[test]
    fn test_modal_lists_derived_matches() {
        plain();
        let mut view = ready_view();
        view.select_visible(1);

        let out = render_dashboard(&view, "Ana", today());
        assert!(out.contains("Email: Sin correo"));
        assert!(out.contains("Partidos (0)"));
        assert!(out.contains("Torneos (0)"));

        view.close_modal();
        view.select_visible(0);
        let out = render_dashboard(&view, "Ana", today());
        assert!(out.contains("Email: ana@club.com"));
        assert!(out.contains("Partidos (1)"));
        assert!(out.contains("Apertura (abierto)"));
    }
}
