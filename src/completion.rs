//! # Shell Completion Module
//!
//! Completion scripts for the CLI, plus dynamic completion of album labels
//! from the catalog store.
//!
//! ```bash
//! # Static completions for any supported shell
//! albumtree completion zsh > ~/.config/zsh/completions/_albumtree
//!
//! # Bash completion that also completes "Name - Artist" labels
//! albumtree completion-enhanced > ~/.local/share/bash-completion/completions/albumtree
//! ```

use crate::db;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io;
use std::path::Path;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Generate enhanced bash completion script with album label completion
pub fn generate_enhanced_bash_completion() {
    println!(r#"#!/bin/bash
# Enhanced Albumtree completion script with album label completion
# Install with: albumtree completion-enhanced > ~/.local/share/bash-completion/completions/albumtree

_albumtree_complete_albums() {{
    if command -v albumtree >/dev/null 2>&1; then
        albumtree complete-albums 2>/dev/null
    fi
}}

_albumtree() {{
    local cur prev words cword
    _init_completion || return

    case "${{prev}}" in
        recommend|explore|similar)
            local IFS=$'\n'
            mapfile -t COMPREPLY < <(_albumtree_complete_albums | grep -i -- "^${{cur}}")
            return 0
            ;;
        completion)
            COMPREPLY=($(compgen -W "bash zsh fish power-shell elvish" -- "${{cur}}"))
            return 0
            ;;
        --format|-f)
            COMPREPLY=($(compgen -W "text json" -- "${{cur}}"))
            return 0
            ;;
        import|--data-dir)
            _filedir
            return 0
            ;;
    esac

    local subcommands="import albums genres similar recommend genre explore reset completion completion-enhanced help"

    if [[ $cword -eq 1 ]]; then
        COMPREPLY=($(compgen -W "$subcommands --data-dir --help --version" -- "${{cur}}"))
    else
        case "${{words[1]}}" in
            import)
                COMPREPLY=($(compgen -W "--force --help" -- "${{cur}}"))
                ;;
            recommend|explore)
                COMPREPLY=($(compgen -W "--branching -b --depth -d --format -f --help" -- "${{cur}}"))
                ;;
            genre)
                COMPREPLY=($(compgen -W "--cap -c --format -f --help" -- "${{cur}}"))
                ;;
            genres)
                COMPREPLY=($(compgen -W "--parent -p --with-albums --format -f --help" -- "${{cur}}"))
                ;;
            albums)
                COMPREPLY=($(compgen -W "--genre -g --limit -l --help" -- "${{cur}}"))
                ;;
            *)
                COMPREPLY=($(compgen -W "$subcommands" -- "${{cur}}"))
                ;;
        esac
    fi
}} &&
complete -F _albumtree albumtree

# ex: filetype=sh
"#);
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Album labels from the store at `db_path`, sorted.
///
/// Completion must never fail loudly, so a missing or unreadable store
/// yields an empty list.
pub fn get_album_completions(db_path: &Path) -> Vec<String> {
    match db::load_catalog(db_path) {
        Ok(catalog) => {
            let mut labels: Vec<String> = catalog.albums().iter().map(|album| album.label()).collect();
            labels.sort();
            labels
        }
        Err(err) => {
            log::debug!("No album completions: {err:#}");
            Vec::new()
        }
    }
}

/// Print album labels, one per line, for shell completion scripts
pub fn print_album_completions(db_path: &Path) {
    for label in get_album_completions(db_path) {
        println!("{label}");
    }
}
