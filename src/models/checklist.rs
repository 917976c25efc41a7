//! Checklist questions, answers and the outbound submission payload.

use serde::{Deserialize, Serialize};

use super::lenient;

pub const QUESTION_COUNT: usize = 11;

/// Minimum trimmed length of the issue description once any answer is not PASS.
pub const MIN_ISSUE_DESCRIPTION_CHARS: usize = 3;

/// The daily pre-use inspection, in the order the gateway stores answers.
pub const QUESTIONS: [&str; QUESTION_COUNT] = [
    "Kiểm tra càng nâng, trụ nâng, ben thuỷ lực và các phụ kiện không có bất cứ dấu hiệu hư hỏng nào",
    "Kiểm tra bánh xe, các dây đai an toàn, sự cố rò rỉ dưới thân xe",
    "Kiểm tra vệ sinh xe trước khi sử dụng",
    "Kiểm tra sự chắc chắn của đầu nối bình ắc quy và ổ cắm sạc",
    "Kiểm tra châm nước bình định kỳ",
    "Kiểm tra tình trạng và khả năng điều chỉnh của ghế ngồi và dây an toàn",
    "Kiểm tra tất cả các bàn đạp và cần điều khiển về sự vận hành trơn tru",
    "Kiểm tra thắng chân và thắng tay về sự hoạt động an toàn",
    "Kiểm tra tình trạng của động cơ, động cơ thủy lực nâng hạ và các cơ cấu chuyền động khác",
    "Kiểm tra đèn, đèn cảnh báo, kèn/ còi và còi de/ lùi",
    "Kiểm tra bất kỳ sự hư hỏng hoặc khuyết tật nào được nhìn thấy",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Answer {
    #[default]
    Pass,
    Fail,
    Other,
}

impl Answer {
    pub const ALL: [Answer; 3] = [Answer::Pass, Answer::Fail, Answer::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Answer::Pass => "PASS",
            Answer::Fail => "FAIL",
            Answer::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Answer::Pass => "Đạt",
            Answer::Fail => "Không đạt",
            Answer::Other => "Khác",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PASS" => Some(Answer::Pass),
            "FAIL" => Some(Answer::Fail),
            "OTHER" => Some(Answer::Other),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("question index {0} is out of range")]
pub struct AnswerIndexOutOfRange(pub usize);

/// Fixed-length answer sheet. Every question starts at PASS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Answers([Answer; QUESTION_COUNT]);

impl Answers {
    pub fn get(&self, index: usize) -> Option<Answer> {
        self.0.get(index).copied()
    }

    /// Replaces the answer at `index` and nothing else.
    pub fn set(&mut self, index: usize, answer: Answer) -> Result<(), AnswerIndexOutOfRange> {
        let slot = self
            .0
            .get_mut(index)
            .ok_or(AnswerIndexOutOfRange(index))?;
        *slot = answer;
        Ok(())
    }

    pub fn has_issue(&self) -> bool {
        self.0.iter().any(|a| *a != Answer::Pass)
    }

    pub fn iter(&self) -> impl Iterator<Item = Answer> + '_ {
        self.0.iter().copied()
    }
}

/// Payload forwarded to `submitChecklist`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSubmission {
    pub forklift_code: String,
    pub employee_code: String,
    pub employee_name: String,
    pub answers: Answers,
    pub issue_description: String,
}

/// Whether a (vehicle, employee) pair already has a checklist today.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleStatus {
    #[serde(default)]
    pub checked: bool,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Successful `submitChecklist` answer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitReceipt {
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub date: Option<String>,
}
