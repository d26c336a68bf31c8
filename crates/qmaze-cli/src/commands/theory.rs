//! Q-learning concepts behind the game

use anyhow::Result;
use qmaze_core::flow::View;
use qmaze_core::MAZE;

const ELEMENTS: [(&str, &str, &str); 5] = [
    (
        "Agent",
        "The one choosing actions in the environment, trying to build a policy that earns more reward.",
        "Your team was the agent.",
    ),
    (
        "Environment",
        "The outside world the agent acts in.",
        "The maze was the environment.",
    ),
    (
        "State",
        "What the agent currently observes.",
        "Your current coordinates (row, column) were the state.",
    ),
    (
        "Action",
        "A move the agent can choose in a state.",
        "Up, down, left and right were the actions.",
    ),
    (
        "Reward",
        "Feedback the environment gives after an action.",
        "", // filled in from the reward table
    ),
];

pub fn run() -> Result<()> {
    print!("{}", text());
    Ok(())
}

pub fn text() -> String {
    let rewards = MAZE.rewards;
    let mut out = String::new();

    out.push_str(&format!("{}\n{}\n\n", View::Theory.title(), "=".repeat(View::Theory.title().len())));
    out.push_str("What you just did is one of the ways an AI learns.\n");
    out.push_str(
        "You looked at the state, chose an action, received a reward, recorded it,\n\
         and discussed which choices were good. That loop is the heart of Q-learning.\n\n",
    );

    out.push_str("What is Q-learning?\n");
    out.push_str(
        "Q-learning is a reinforcement-learning algorithm in which an agent keeps updating a\n\
         Q-table (a score sheet) while interacting with its environment, learning which action\n\
         is good in which state. Nobody hands it the answer: it learns by trial and error.\n\
         In this lesson people judged the policy instead of a computer.\n\n",
    );

    out.push_str("The five core elements\n");
    for (idx, (name, meaning, here)) in ELEMENTS.iter().enumerate() {
        out.push_str(&format!("  {}. {name}: {meaning}\n", idx + 1));
        if here.is_empty() {
            out.push_str(&format!(
                "     Here: obstacle or wall {}, normal move {}, reaching the goal +{}.\n",
                rewards.invalid, rewards.step, rewards.exit
            ));
        } else {
            out.push_str(&format!("     Here: {here}\n"));
        }
    }

    out.push_str("\nWhat is a Q-table?\n");
    out.push_str(
        "It records \"how good was it to take this action in this state?\". The table you\n\
         filled in at every step was your Q-table; Q-learning keeps improving those values.\n\
         Today you wrote good/bad policy judgments instead of numbers.\n\n",
    );

    out.push_str("Looking back\n");
    for line in [
        "You looked at where you were (state)",
        "decided where to go (action)",
        "received points (reward)",
        "wrote it into the Q-table",
        "and debated whether it was a good choice (policy evaluation)",
    ] {
        out.push_str(&format!("  - {line}\n"));
    }
    out.push_str("\nThat is the basic structure of reinforcement learning, experienced through human judgment.\n");
    out
}
