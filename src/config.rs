pub const DEFAULT_INPUT: &str = "li.html";
pub const DEFAULT_OUTPUT: &str = "physics.json";
pub const INDEX_FILE: &str = "ti_index.json";

pub const QUIZ_TITLE: &str = "物理学知识问答";
pub const QUIZ_DESCRIPTION: &str = "物理学知识问答：通过我们包含关于著名物理学家、突破性发现、迷人现象等问题的物理学系列问答，来测试您对宇宙基本法则的了解程度！";
pub const QUESTIONS_PER_QUIZ: usize = 20;

/// Fixed descriptive fields stamped onto every document of one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizMeta {
    pub title: String,
    pub description: String,
    pub questions_per_quiz: usize,
}

impl Default for QuizMeta {
    fn default() -> Self {
        QuizMeta {
            title: QUIZ_TITLE.to_string(),
            description: QUIZ_DESCRIPTION.to_string(),
            questions_per_quiz: QUESTIONS_PER_QUIZ,
        }
    }
}
