//! 结果打印模块
//!
//! 命令行模式下把生成的测验打印到标准输出。

use crate::export::QuizDocument;
use crate::quiz::{answer_label, difficulty_label, option_letter, question_type_label};
use rust_i18n::t;

/// 打印测验，可选显示答案与解析
pub fn display_quiz(doc: &QuizDocument, show_answers: bool) {
    println!("\n{}", "═".repeat(60));
    println!("{:^60}", t!("quiz_ready"));
    println!("{}", "═".repeat(60));

    println!("\n  {}", doc.title);
    if !doc.description.is_empty() {
        println!("  {}", doc.description);
    }
    println!(
        "  {}",
        t!("quiz_total", n = doc.questions.len())
    );

    for (i, question) in doc.questions.iter().enumerate() {
        println!("\n  {}", "─".repeat(40));
        println!(
            "  {}. [{}] [{}]",
            i + 1,
            question_type_label(question.question_type),
            difficulty_label(question.difficulty)
        );
        for line in question.text.lines() {
            println!("     {}", line);
        }

        let correct = question.correct_option_index();
        if let Some(options) = &question.options {
            for (index, option) in options.iter().enumerate() {
                let marker = if show_answers && correct == Some(index) {
                    "✓"
                } else {
                    " "
                };
                println!("   {} {}. {}", marker, option_letter(index), option);
            }
        }

        if show_answers {
            println!(
                "     {}: {}",
                answer_label(question.question_type),
                question.correct_answer
            );
            if !question.explanation.is_empty() {
                println!("     {}: {}", t!("explanation"), question.explanation);
            }
        }
    }

    println!("\n{}", "═".repeat(60));
}

/// 是否运行交互模式（无参数时启用）
pub fn should_run_interactive() -> bool {
    let args: Vec<String> = std::env::args().collect();
    args.len() == 1
}
