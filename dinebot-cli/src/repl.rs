//! Terminal REPL: renders outbound messages and routes input back into the
//! session. Chips and feedback targets are selected by number; slash commands
//! drive the sub-workflow forms.

use std::io::Write;

use anyhow::Result;
use dinebot_core::DinebotError;
use session::{
    Chip, FeedbackStage, FeedbackTarget, OutboundMessage, SessionController,
};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands: /reset /orders /quit | feedback form: /rate N, /comment TEXT, /image PATH, /submit | order: /notes TEXT, /confirm
Numbers select chips (or a feedback target while one is offered).";

/// Pending numbered affordances from the most recent render.
#[derive(Default)]
struct Affordances {
    chips: Vec<Chip>,
    targets: Vec<FeedbackTarget>,
}

pub async fn run(mut controller: SessionController) -> Result<()> {
    let mut affordances = Affordances::default();

    let replay = controller.start().await?;
    render_all(&replay, &mut affordances);
    println!("{}", HELP);

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "/quit" || line == "/exit" {
            break;
        }
        if line == "/help" {
            println!("{}", HELP);
            continue;
        }
        if line == "/orders" {
            match controller.order_history().await {
                Ok(orders) if orders.is_empty() => println!("No confirmed orders yet."),
                Ok(orders) => {
                    for order in orders {
                        println!("{} — {}", order.created_at, order.item_lines().join(", "));
                    }
                }
                Err(e) => eprintln!("error: {}", e),
            }
            continue;
        }

        let outcome = dispatch(&mut controller, &line, &affordances).await;
        match outcome {
            Ok(Some(messages)) => render_all(&messages, &mut affordances),
            Ok(None) => {}
            Err(e) => eprintln!("error: {}", e),
        }
    }

    Ok(())
}

/// Routes one input line. `Ok(Some(..))` carries new messages to render;
/// `Ok(None)` means the line was a local form edit with nothing to show.
async fn dispatch(
    controller: &mut SessionController,
    line: &str,
    affordances: &Affordances,
) -> Result<Option<Vec<OutboundMessage>>, DinebotError> {
    if line == "/reset" {
        return controller.reset().await.map(Some);
    }
    if let Some(rating) = line.strip_prefix("/rate ") {
        let rating: u8 = rating.trim().parse().unwrap_or(0);
        controller.set_feedback_rating(rating)?;
        println!(
            "Rating set.{}",
            if controller.feedback_can_submit() {
                " You can /submit now."
            } else {
                " A comment is required for low ratings (/comment)."
            }
        );
        return Ok(None);
    }
    if let Some(comment) = line.strip_prefix("/comment ") {
        controller.set_feedback_comment(comment.trim())?;
        println!("Comment set.");
        return Ok(None);
    }
    if let Some(path) = line.strip_prefix("/image ") {
        let path = path.trim();
        let bytes = std::fs::read(path)?;
        controller.attach_feedback_image(path, bytes)?;
        println!("Image attached.");
        return Ok(None);
    }
    if line == "/submit" {
        return controller.submit_feedback().await.map(Some);
    }
    if let Some(notes) = line.strip_prefix("/notes ") {
        controller.set_order_notes(notes.trim())?;
        println!("Notes set. /confirm to place the order.");
        return Ok(None);
    }
    if line == "/confirm" {
        return controller.confirm_order().await.map(Some);
    }

    if let Ok(index) = line.parse::<usize>() {
        if controller.feedback_stage() == FeedbackStage::TargetSelection {
            if let Some(target) = affordances.targets.get(index.saturating_sub(1)) {
                return controller.choose_feedback_target(target.clone()).await.map(Some);
            }
        }
        if let Some(chip) = affordances.chips.get(index.saturating_sub(1)) {
            let chip = chip.clone();
            return controller.select_chip(&chip).await.map(Some);
        }
        println!("No option #{} on screen.", index);
        return Ok(None);
    }

    controller.send_message(line).await.map(Some)
}

fn render_all(messages: &[OutboundMessage], affordances: &mut Affordances) {
    for message in messages {
        render(message, affordances);
    }
}

fn render(message: &OutboundMessage, affordances: &mut Affordances) {
    match message {
        OutboundMessage::Text(text) => println!("{}", text),
        OutboundMessage::LinkButton { label, url, .. } => {
            println!("[{}] {}", label, url);
        }
        OutboundMessage::ChipRow(chips) => {
            affordances.chips = chips.clone();
            let row: Vec<String> = chips
                .iter()
                .enumerate()
                .map(|(i, chip)| format!("({}) {}", i + 1, chip.label))
                .collect();
            println!("{}", row.join("  "));
        }
        OutboundMessage::FeedbackOffer { targets } => {
            affordances.targets = targets.clone();
            let row: Vec<String> = targets
                .iter()
                .enumerate()
                .map(|(i, target)| format!("({}) {}", i + 1, target.label()))
                .collect();
            println!("Who is this feedback for? {}", row.join("  "));
        }
        OutboundMessage::FeedbackForm { target } => {
            println!(
                "Feedback for {} — /rate 1..5, optional /comment and /image, then /submit.",
                target.label()
            );
        }
        OutboundMessage::OrderConfirmation { summary } => {
            println!(
                "Confirm this order?\n{}\nOptional /notes TEXT, then /confirm.",
                summary
            );
        }
    }
}
