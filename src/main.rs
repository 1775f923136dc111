use anyhow::anyhow;
use argh::FromArgs;
use keymenu::terminal::NoTerminal;
use keymenu::{
    Command, Context, Dispatcher, GlobalCommand, InputError, index, read_int, read_line,
    read_rune, read_time,
};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Example menu: navigate with single keys, `?` for help, `q` to quit.
struct Args {
    /// keep the terminal in line mode, so every key needs enter
    #[argh(switch)]
    no_raw: bool,

    /// disable the `!` shell escape key
    #[argh(switch)]
    no_shell: bool,

    /// log debug output to stderr
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut dispatcher = Dispatcher::new(menu());
    if args.no_raw {
        dispatcher = dispatcher.with_terminal(NoTerminal);
    }
    if args.no_shell {
        dispatcher = dispatcher.disable_global(GlobalCommand::ShellEscape);
    }

    println!("keymenu example");
    println!("use q to quit and ? for help");
    dispatcher.run()
}

fn menu() -> Command {
    Command::new("keymenu")
        .description("keymenu example program")
        .pre(|_| {
            println!("(root pre hook, could clear the screen)");
            Ok(())
        })
        .child(
            'h',
            Command::new("hello")
                .description("print hello world")
                .rank(1)
                .pre(|_| {
                    println!("(pre hook printed this)");
                    Ok(())
                })
                .function(|_| {
                    println!("hello world!");
                    Ok(())
                })
                .post(|_| {
                    println!("(post hook printed this)");
                    Ok(())
                }),
        )
        .child('i', input_menu().rank(2))
        .child(
            's',
            Command::new("select")
                .description("select by index")
                .rank(3)
                .function(select_index),
        )
        .child('e', error_menu())
}

fn input_menu() -> Command {
    Command::new("input")
        .description("input different stuff using sub commands")
        .child(
            's',
            Command::new("string")
                .description("input a string")
                .function(|ctx| {
                    let text = read_line(&ctx.input_prompt("enter text"), "")?;
                    println!("you entered: {text:?}");
                    Ok(())
                })
                .post(|_| {
                    println!("text was entered");
                    Ok(())
                }),
        )
        .child(
            'n',
            Command::new("number")
                .description("input a number")
                .pre(|_| {
                    println!("pre number selection");
                    Ok(())
                })
                .function(|ctx| {
                    let n = read_int(&ctx.input_prompt("enter number up to 10"), "", 10)?;
                    println!("you entered: {n}");
                    Ok(())
                }),
        )
        .child(
            't',
            Command::new("time")
                .description("input a time as HH:MM or HHMM")
                .function(|ctx| {
                    let (time, tail) = read_time(&ctx.input_prompt("HH:MM"), "12:34")?;
                    println!("you entered: {time} {tail:?}");
                    Ok(())
                }),
        )
        .child(
            ' ',
            Command::new("extra")
                .description("test another level")
                .child(
                    'a',
                    Command::new("abort")
                        .description("prints a message and aborts")
                        .function(|_| {
                            println!("aborting");
                            Err(InputError::Abort.into())
                        }),
                ),
        )
}

fn error_menu() -> Command {
    Command::new("errors")
        .description("select what error to show")
        .child(
            '<',
            Command::new("pre")
                .description("show a pre hook error")
                .pre(|_| Err(anyhow!("planned pre error")))
                .function(|_| {
                    println!("this should not be shown");
                    Ok(())
                }),
        )
        .child(
            'c',
            Command::new("command")
                .description("show a command error")
                .function(|_| Err(anyhow!("planned command error"))),
        )
        .child(
            '>',
            Command::new("post")
                .description("show a post hook error")
                .function(|_| {
                    println!("correct output");
                    Ok(())
                })
                .post(|_| Err(anyhow!("planned post error"))),
        )
}

fn select_index(ctx: &Context<'_>) -> anyhow::Result<()> {
    let options = ["one option", "another option", "a third option"];

    println!("select:");
    for (i, option) in options.iter().enumerate() {
        let key = index::index_rune(i).ok_or_else(|| anyhow!("too many options"))?;
        println!("  {key}: {option}");
    }

    let key = read_rune(&ctx.rune_prompt("select index"))?;
    let option = index::rune_index(key)
        .and_then(|i| options.get(i))
        .ok_or_else(|| anyhow!("no match for {key:?}"))?;
    println!("you selected {option:?}");
    Ok(())
}
