use std::io::BufRead;

use sodium::{SodiumCtx, StreamSink};

use rewindttt::{Error, GameState, Mark, Status, TicTacToe};

fn main() {
    let ctx = SodiumCtx::new();

    let (boot, kb_input, _listeners) = ctx.transaction(|| {
        let mut listeners = Vec::new();

        let boot: StreamSink<()> = ctx.new_stream_sink();
        let kb_input: StreamSink<String> = ctx.new_stream_sink();

        let game = TicTacToe::new(&ctx, &kb_input.stream());

        listeners.push(boot.stream().listen({
            let game_cell = game.game.clone();
            move |_: &()| {
                println!("Welcome to Tic Tac Toe!\n");
                println!("Mark a square by typing its number (1-9, numpad layout).");
                println!("Time travel with 'jump <step>'; 'jump 0' returns to the start.\n");
                render(&game_cell.sample());
            }
        }));

        listeners.push(game.error.listen(|err: &Error| println!("{}", err)));

        listeners.push(game.moves.listen(|(index, mark): &(usize, Mark)| {
            println!("\n{:?}s took square {}:", mark, index + 1)
        }));

        listeners.push(game.jumps.listen(|step: &usize| match step {
            0 => println!("\nBack to the start of the game:"),
            step => println!("\nJumped to move #{}:", step),
        }));

        listeners.push(
            game.game
                .updates()
                .listen(|game: &GameState| render(game)),
        );

        (boot, kb_input, listeners)
    });

    let stdin = std::io::stdin().lock();

    boot.send(());
    for line in stdin.lines() {
        kb_input.send(line.unwrap());
    }
}

fn render(game: &GameState) {
    println!("{}", game.current_board());
    match game.status() {
        Status::Winner(mark) => println!("{:?} has won the game!", mark),
        Status::Draw => println!("The game is a draw!"),
        Status::InProgress(mark) => println!("Next player: {:?}", mark),
    }
    if game.steps() > 1 {
        println!("(history: jump 0-{})", game.steps() - 1);
    }
}
