use crate::utils::error::{Result, ShieldError};
use serde::{Deserialize, Serialize};

/// Minimum percentage score to pass a quiz.
const PASS_MARK: f32 = 70.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_minutes: u32,
    pub level: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub lesson_id: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudStory {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub lesson: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    pub score: f32,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
}

/// Static lesson/quiz/story library. Loaded once from bundled fixtures;
/// lookups are plain array scans.
#[derive(Debug, Clone, Deserialize)]
pub struct EducationLibrary {
    #[serde(default)]
    lessons: Vec<Lesson>,
    #[serde(default)]
    quizzes: Vec<Quiz>,
    #[serde(default)]
    stories: Vec<FraudStory>,
}

const BUNDLED_EDUCATION: &str = include_str!("../../data/education.toml");

impl EducationLibrary {
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(BUNDLED_EDUCATION)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ShieldError::CatalogParseError {
            message: format!("education fixtures: {}", e),
        })
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn lesson(&self, id: &str) -> Result<&Lesson> {
        self.lessons
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| ShieldError::LessonNotFound { id: id.to_string() })
    }

    pub fn quiz_for_lesson(&self, lesson_id: &str) -> Result<&Quiz> {
        self.quizzes
            .iter()
            .find(|q| q.lesson_id == lesson_id)
            .ok_or_else(|| ShieldError::QuizNotFound {
                id: format!("lesson {}", lesson_id),
            })
    }

    /// Scores submitted answers against the quiz key. Missing or out-of-range
    /// answers are simply wrong.
    pub fn submit_quiz(&self, quiz_id: &str, answers: &[usize]) -> Result<QuizResult> {
        let quiz = self
            .quizzes
            .iter()
            .find(|q| q.id == quiz_id)
            .ok_or_else(|| ShieldError::QuizNotFound {
                id: quiz_id.to_string(),
            })?;

        let total = quiz.questions.len();
        let correct = quiz
            .questions
            .iter()
            .enumerate()
            .filter(|(i, question)| answers.get(*i) == Some(&question.correct_answer))
            .count();

        let score = if total == 0 {
            0.0
        } else {
            (correct as f32 / total as f32) * 100.0
        };

        Ok(QuizResult {
            score,
            correct,
            total,
            passed: score >= PASS_MARK,
        })
    }

    pub fn stories(&self) -> &[FraudStory] {
        &self.stories
    }
}
