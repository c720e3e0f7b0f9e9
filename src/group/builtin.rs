// src/group/builtin.rs

use once_cell::sync::Lazy;

use super::types::{AnswerKey, BackgroundField, GroupConfig, GroupSet};

/// Correct answer for each of the twelve knowledge questions, in question
/// order. Pre and post tests ask the same questions.
static ANSWERS_BY_POSITION: [&str; 12] = [
    "One entire pass over all training samples",
    "6 4 3 1 5 2",
    "A function measuring prediction error",
    "Inputs are weighted and summed through the network",
    "Inputs are weighted and summed through the network",
    "Combining the outputs of previous neurons to generate the result of the network.",
    "Determine the influence strength of an input on the neuron's output",
    "Computes how errors change with respect to weights and biases",
    "It provides feedback on how far predictions are from actual targets",
    "2,3",
    "To enable the activation function to shift left or right",
    "Bias is learned during training like weights",
];

static BACKGROUND: &[(&str, &str)] = &[
    ("Q1", "cs_background"),
    ("Q2", "nn_course"),
    ("Q3_1", "derivative_familiarity"),
];

static VR_PRE: [&str; 12] = [
    "Q16", "Q17", "Q18", "Q19", "Q20", "Q21", "Q22", "Q23", "Q24", "Q25", "Q26", "Q27",
];
static VR_POST: [&str; 12] = [
    "Q87", "Q88", "Q89", "Q90", "Q91", "Q92", "Q93", "Q94", "Q95", "Q96", "Q97", "Q98",
];

// Q52.1 and Q55.1 are the second Q52/Q55 columns of the Video export.
static VIDEO_PRE: [&str; 12] = [
    "Q48", "Q49", "Q50", "Q51", "Q52", "Q53", "Q54", "Q55", "Q56", "Q57", "Q52.1", "Q55.1",
];
static VIDEO_POST: [&str; 12] = [
    "Q71", "Q72", "Q73", "Q74", "Q75", "Q76", "Q77", "Q78", "Q79", "Q80", "Q81", "Q84",
];

/// VR first, then Video as the fallback.
pub static BUILTIN_GROUPS: Lazy<GroupSet> = Lazy::new(|| GroupSet {
    background: BACKGROUND
        .iter()
        .map(|(source, field)| BackgroundField {
            source: source.to_string(),
            field: field.to_string(),
        })
        .collect(),
    groups: vec![
        group("VR", Some("VR"), &VR_PRE, &VR_POST),
        group("Video", None, &VIDEO_PRE, &VIDEO_POST),
    ],
});

fn group(label: &str, marker: Option<&str>, pre: &[&str; 12], post: &[&str; 12]) -> GroupConfig {
    let mut answers = AnswerKey::new();
    for cols in [pre, post] {
        for (col, answer) in cols.iter().zip(ANSWERS_BY_POSITION.iter()) {
            answers.insert(col.to_string(), answer.to_string());
        }
    }
    GroupConfig {
        label: label.to_string(),
        marker: marker.map(str::to_string),
        pre: pre.iter().map(|s| s.to_string()).collect(),
        post: post.iter().map(|s| s.to_string()).collect(),
        answers,
    }
}
