use std::error::Error;
use std::time::Duration;

use clap::Parser;
use shakmaty::{fen::Fen, san::SanPlus, CastlingMode, Chess, Color, Position};

use chess_agent::config;
use chess_agent::constants::{MATE_BOUND, MATE_SCORE};
use chess_agent::{PvsSearcher, SearchConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to analyze, as a FEN string (defaults to the starting position)
    #[arg(long)]
    fen: Option<String>,

    /// Search to a fixed depth instead of using the clock
    #[arg(long)]
    depth: Option<u8>,

    /// Remaining clock time, in milliseconds
    #[arg(long, default_value_t = 60_000)]
    time_ms: u64,

    /// Clock increment per move, in milliseconds
    #[arg(long, default_value_t = 0)]
    inc_ms: u64,

    /// Named search profile to load from the profiles directory
    #[arg(long)]
    profile: Option<String>,

    /// Play this many plies of self-play from the position instead of
    /// analyzing it
    #[arg(long)]
    selfplay: Option<u32>,

    /// List the saved search profiles and exit
    #[arg(long)]
    list_profiles: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    if args.list_profiles {
        for name in config::get_profiles()? {
            println!("{name}");
        }
        return Ok(());
    }

    let search_config = match &args.profile {
        Some(name) => config::load_profile(name)?,
        None => SearchConfig::default(),
    };

    let pos: Chess = match &args.fen {
        Some(fen) => fen.parse::<Fen>()?.into_position(CastlingMode::Standard)?,
        None => Chess::default(),
    };

    let mut searcher = PvsSearcher::new(search_config);
    let remaining = Duration::from_millis(args.time_ms);
    let increment = Duration::from_millis(args.inc_ms);

    match args.selfplay {
        Some(plies) => selfplay(&mut searcher, pos, plies, args.depth, remaining, increment),
        None => analyze(&mut searcher, &pos, args.depth, remaining, increment),
    }

    Ok(())
}

fn analyze(
    searcher: &mut PvsSearcher,
    pos: &Chess,
    depth: Option<u8>,
    remaining: Duration,
    increment: Duration,
) {
    let best = match depth {
        Some(depth) => {
            let report = searcher.search_to_depth(pos, depth);
            println!(
                "depth {} score {} nodes {} qnodes {} time {}ms",
                report.depth,
                describe_score(report.score),
                report.nodes,
                report.qnodes,
                report.elapsed.as_millis()
            );
            report.best_move
        }
        None => searcher.choose_move(pos, remaining, increment),
    };

    match best {
        Some(m) => println!("bestmove {}", SanPlus::from_move(pos.clone(), m)),
        None => println!("bestmove (none): the game is over"),
    }
}

fn selfplay(
    searcher: &mut PvsSearcher,
    mut pos: Chess,
    plies: u32,
    depth: Option<u8>,
    remaining: Duration,
    increment: Duration,
) {
    let mut sans = Vec::new();

    for _ in 0..plies {
        if pos.is_game_over() {
            break;
        }

        let best = match depth {
            Some(depth) => searcher.search_to_depth(&pos, depth).best_move,
            None => searcher.choose_move(&pos, remaining, increment),
        };
        let Some(m) = best else { break };

        sans.push(SanPlus::from_move(pos.clone(), m));
        pos.play_unchecked(m);
    }

    let mut line = String::new();
    for (i, san) in sans.iter().enumerate() {
        if i % 2 == 0 {
            line.push_str(&format!("{}. ", i / 2 + 1));
        }
        line.push_str(&format!("{san} "));
    }
    println!("{}", line.trim_end());

    if pos.is_game_over() {
        let result = match pos.outcome().winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        };
        println!("{result}");
    }
}

fn describe_score(score: i32) -> String {
    if score >= MATE_BOUND {
        format!("mate in {} plies", MATE_SCORE - score)
    } else if score <= -MATE_BOUND {
        format!("mated in {} plies", score + MATE_SCORE)
    } else {
        format!("{score} cp")
    }
}
