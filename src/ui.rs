//! Dashboard rendering.
//!
//! The dashboard is a borderless two-column table: the Spotify logo on the
//! left and the statistics on the right. Rendering is a pure function of the
//! [`DashboardView`]; only [`display_dashboard`] touches stdout.

use colored::Colorize;
use tabled::{
    Table,
    builder::Builder,
    settings::{Alignment, Padding, Style, object::Columns},
};

use crate::{
    types::{DashboardView, TrackEntry},
    utils,
};

const SPOTIFY_LOGO: &str = "
⠀⠀⠀⠀⠀⠀⠀⢀⣠⣤⣤⣶⣶⣶⣶⣤⣤⣄⡀⠀⠀⠀⠀⠀⠀⠀
⠀⠀⠀⠀⢀⣤⣾⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣷⣤⡀⠀⠀⠀⠀
⠀⠀⠀⣴⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣦⠀⠀⠀
⠀⢀⣾⣿⡿⠿⠛⠛⠛⠉⠉⠉⠉⠛⠛⠛⠿⠿⣿⣿⣿⣿⣿⣷⡀⠀
⠀⣾⣿⣿⣇⠀⣀⣀⣠⣤⣤⣤⣤⣤⣀⣀⠀⠀⠀⠈⠙⠻⣿⣿⣷⠀
⢠⣿⣿⣿⣿⡿⠿⠟⠛⠛⠛⠛⠛⠛⠻⠿⢿⣿⣶⣤⣀⣠⣿⣿⣿⡄
⢸⣿⣿⣿⣿⣇⣀⣀⣤⣤⣤⣤⣤⣄⣀⣀⠀⠀⠉⠛⢿⣿⣿⣿⣿⡇
⠘⣿⣿⣿⣿⣿⠿⠿⠛⠛⠛⠛⠛⠛⠿⠿⣿⣶⣦⣤⣾⣿⣿⣿⣿⠃
⠀⢿⣿⣿⣿⣿⣤⣤⣤⣤⣶⣶⣦⣤⣤⣄⡀⠈⠙⣿⣿⣿⣿⣿⡿⠀
⠀⠈⢿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣷⣾⣿⣿⣿⣿⡿⠁⠀
⠀⠀⠀⠻⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⠟⠀⠀⠀
⠀⠀⠀⠀⠈⠛⢿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⣿⡿⠛⠁⠀⠀⠀⠀
⠀⠀⠀⠀⠀⠀⠀⠈⠙⠛⠛⠿⠿⠿⠿⠛⠛⠋⠁⠀⠀⠀⠀⠀⠀⠀
";

/// Prints the dashboard surrounded by blank lines.
pub fn display_dashboard(view: &DashboardView) {
    println!();
    println!("{}", render_dashboard(view));
    println!();
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let logo = SPOTIFY_LOGO
        .trim_matches('\n')
        .lines()
        .map(|line| line.green().to_string())
        .collect::<Vec<_>>()
        .join("\n");

    let mut layout = Builder::default();
    layout.push_record([logo, info_panel(view)]);

    let mut table = layout.build();
    table
        .with(Style::empty())
        .with(Padding::new(0, 4, 0, 0))
        .modify(Columns::first(), Alignment::center())
        .modify(Columns::first(), Alignment::center_vertical());
    table.to_string()
}

/// Right-hand column: user summary followed by the two ranked lists.
fn info_panel(view: &DashboardView) -> String {
    let artist_rows: Vec<String> = view.artists.iter().map(|a| a.white().to_string()).collect();
    let track_rows: Vec<String> = view.tracks.iter().map(track_line).collect();

    [
        user_grid(view),
        heading("Top 5 Artists"),
        ranked_list(artist_rows),
        heading("Top 5 Tracks"),
        ranked_list(track_rows),
    ]
    .into_iter()
    .filter(|section| !section.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}

fn user_grid(view: &DashboardView) -> String {
    let mut grid = Builder::default();
    grid.push_record([
        "User:".white().bold().to_string(),
        view.display_name.green().to_string(),
    ]);
    grid.push_record([
        "Followers:".white().bold().to_string(),
        view.followers.to_string().green().to_string(),
    ]);
    grid.push_record([
        "Period:".white().bold().to_string(),
        view.period.green().to_string(),
    ]);

    borderless(grid.build(), Alignment::left())
}

fn heading(title: &str) -> String {
    title.green().bold().underline().to_string()
}

/// One row per entry, numbered from 1. Empty input renders nothing.
fn ranked_list(rows: Vec<String>) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let mut list = Builder::default();
    for (i, row) in rows.into_iter().enumerate() {
        list.push_record([format!("{}.", i + 1).green().bold().to_string(), row]);
    }

    borderless(list.build(), Alignment::right())
}

fn track_line(track: &TrackEntry) -> String {
    if track.artists.is_empty() {
        return track.name.white().to_string();
    }

    let artists = format!("({})", utils::join_artist_names(&track.artists));
    format!("{} {}", track.name.white(), artists.dimmed())
}

fn borderless(mut table: Table, first_column: Alignment) -> String {
    table
        .with(Style::empty())
        .with(Padding::new(0, 1, 0, 0))
        .modify(Columns::first(), first_column);
    table.to_string()
}
