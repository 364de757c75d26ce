use tracing_subscriber::EnvFilter;
use waypoint::{Action, Block, RuleSetBuilder, Session, Survey, question};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let survey = Survey::new(vec![
        Block::new("about", 1, ["age", "has_pets"]).with_title("About you"),
        Block::new("pets", 2, ["pet_kind", "pet_count"]).with_title("Your pets"),
        Block::new("work", 3, ["employed"]).with_title("Work"),
        Block::new("wrap_up", 4, ["comments"]).with_title("Wrap up"),
    ]);

    let ruleset = RuleSetBuilder::new()
        .rule("minors_end", "about", |r| {
            r.priority(0)
                .name("Minors finish early")
                .when(question("age").less_than(18_i64))
                .then(Action::show_message("Thanks, that's all for now."))
                .then(Action::End)
        })
        .rule("no_pets", "about", |r| {
            r.when(question("has_pets").equals("no"))
                .then(Action::skip_blocks(["pets"]))
        })
        .rule("single_pet", "pets", |r| {
            r.when(question("pet_count").less_than(2_i64))
                .then(Action::goto_block_question("wrap_up", "comments"))
        })
        .build(survey);

    println!("{ruleset}");

    let mut session = Session::start(&ruleset);
    let scripted = [
        ("age", "34"),
        ("has_pets", "no"),
        ("employed", "yes"),
        ("comments", "none"),
    ];

    for (question_id, value) in scripted {
        let Some(position) = session.position().cloned() else {
            break;
        };
        println!("at {position:?}, answering {question_id} = {value}");
        session.answer(question_id, value);
        if let Some(navigation) = session.advance(&ruleset) {
            println!("  -> {navigation}");
        }
    }

    println!("finished: {}", session.is_finished());
    for message in session.messages() {
        println!("message: {message}");
    }
}
