//! The scripted question-and-answer flow that collects a [`LoanApplication`].
//!
//! The flow is a plain value: each call to [`ApplicationFlow::submit`]
//! consumes the current state and hands back the next one together with the
//! assistant's replies. Nothing is held globally and nothing sleeps; pacing
//! the replies is left to whoever displays them.
//!
//! ```
//! use loan_core::flow::{ApplicationFlow, FlowOutcome, FlowSettings, Step};
//!
//! let (flow, _greeting) = ApplicationFlow::start(FlowSettings::default());
//! assert_eq!(flow.step(), Step::Name);
//!
//! let flow = match flow.submit("Asha") {
//!     FlowOutcome::Advanced { flow, .. } => flow,
//!     other => panic!("unexpected outcome: {other:?}"),
//! };
//! assert_eq!(flow.step(), Step::LoanAmount);
//!
//! // A rejected answer keeps the flow where it was.
//! let flow = match flow.submit("lots") {
//!     FlowOutcome::Rejected { flow, .. } => flow,
//!     other => panic!("unexpected outcome: {other:?}"),
//! };
//! assert_eq!(flow.step(), Step::LoanAmount);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::format::{DigitGrouping, format_currency};
use crate::models::LoanApplication;
use crate::validation::{self, ValidationError};

/// How long the presenter should wait before showing a message.
///
/// The flow only says which kind of pause is wanted; the durations belong to
/// the presentation layer's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pause {
    /// Before the first message and before replying to an answer.
    Short,
    /// Between two consecutive assistant messages.
    Long,
    /// Before handing over to the eligibility report.
    Analysis,
}

/// One assistant chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotMessage {
    pub text: String,
    pub pause: Pause,
}

impl BotMessage {
    fn new(
        text: impl Into<String>,
        pause: Pause,
    ) -> Self {
        Self {
            text: text.into(),
            pause,
        }
    }
}

/// The question currently being asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Name,
    LoanAmount,
    Salary,
    CreditScore,
    Purpose,
}

impl Step {
    /// The question text.
    pub fn prompt(self) -> &'static str {
        match self {
            Self::Name => "Let's get started! What is your full name?",
            Self::LoanAmount => "How much loan amount are you looking for? (in ₹)",
            Self::Salary => "What is your monthly salary? (in ₹)",
            Self::CreditScore => "What is your credit score? (300-900)",
            Self::Purpose => {
                "What is the purpose of this loan? (e.g., Home Renovation, Education, Medical)"
            }
        }
    }

    /// Hint shown in an empty input box.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Enter your full name...",
            Self::LoanAmount => "Enter amount (e.g., 500000)...",
            Self::Salary => "Enter monthly salary...",
            Self::CreditScore => "Enter credit score (300-900)...",
            Self::Purpose => "Enter loan purpose...",
        }
    }

    /// 1-based position, for "question 2 of 5" style displays.
    pub fn number(self) -> usize {
        match self {
            Self::Name => 1,
            Self::LoanAmount => 2,
            Self::Salary => 3,
            Self::CreditScore => 4,
            Self::Purpose => 5,
        }
    }

    pub const COUNT: usize = 5;
}

/// Settings that shape the assistant's wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowSettings {
    /// Lender named in the greeting.
    pub lender: String,
    pub grouping: DigitGrouping,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            lender: "Tata Capital".to_string(),
            grouping: DigitGrouping::default(),
        }
    }
}

/// Answers accepted so far. Each variant holds exactly what was collected
/// before its question.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Progress {
    Name,
    LoanAmount {
        name: String,
    },
    Salary {
        name: String,
        loan_amount: u64,
    },
    CreditScore {
        name: String,
        loan_amount: u64,
        salary: u64,
    },
    Purpose {
        name: String,
        loan_amount: u64,
        salary: u64,
        credit_score: u16,
    },
}

impl Progress {
    fn step(&self) -> Step {
        match self {
            Self::Name => Step::Name,
            Self::LoanAmount { .. } => Step::LoanAmount,
            Self::Salary { .. } => Step::Salary,
            Self::CreditScore { .. } => Step::CreditScore,
            Self::Purpose { .. } => Step::Purpose,
        }
    }
}

/// An accepted answer: either the next question with its acknowledgement,
/// or the finished application.
enum Accepted {
    Next(Progress, String),
    Done(LoanApplication),
}

/// Current question plus the answers collected before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationFlow {
    progress: Progress,
    settings: FlowSettings,
}

/// Result of submitting one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The answer was refused; `flow` is unchanged and `message` says why.
    Rejected {
        flow: ApplicationFlow,
        error: ValidationError,
        message: BotMessage,
    },
    /// The answer was accepted and the flow moved to the next question.
    Advanced {
        flow: ApplicationFlow,
        messages: Vec<BotMessage>,
    },
    /// The last answer was accepted.
    Completed {
        application: LoanApplication,
        messages: Vec<BotMessage>,
    },
}

impl ApplicationFlow {
    /// Opens the conversation at the first question.
    pub fn start(settings: FlowSettings) -> (Self, Vec<BotMessage>) {
        let greeting = vec![
            BotMessage::new(
                format!("Hello! Welcome to {}'s AI Loan Assistant. 👋", settings.lender),
                Pause::Short,
            ),
            BotMessage::new(
                "I'm here to help you apply for a personal loan quickly and easily.",
                Pause::Long,
            ),
            BotMessage::new(Step::Name.prompt(), Pause::Long),
        ];

        let flow = Self {
            progress: Progress::Name,
            settings,
        };
        (flow, greeting)
    }

    pub fn step(&self) -> Step {
        self.progress.step()
    }

    pub fn placeholder(&self) -> &'static str {
        self.step().placeholder()
    }

    pub fn prompt(&self) -> &'static str {
        self.step().prompt()
    }

    /// Validates `input` for the current step.
    ///
    /// On success the flow advances exactly one step; on failure it stays
    /// put and the reply is the field-specific re-prompt.
    pub fn submit(
        mut self,
        input: &str,
    ) -> FlowOutcome {
        debug!(step = ?self.step(), "answer submitted");

        let grouping = self.settings.grouping;
        let accepted = match &self.progress {
            Progress::Name => validation::parse_name(input).map(|name| {
                let reply = format!("Nice to meet you, {name}! 😊");
                Accepted::Next(Progress::LoanAmount { name }, reply)
            }),
            Progress::LoanAmount { name } => {
                validation::parse_loan_amount(input).map(|loan_amount| {
                    let reply = format!(
                        "Great! You're looking for {}.",
                        format_currency(loan_amount, grouping)
                    );
                    let next = Progress::Salary {
                        name: name.clone(),
                        loan_amount,
                    };
                    Accepted::Next(next, reply)
                })
            }
            Progress::Salary { name, loan_amount } => {
                validation::parse_salary(input).map(|salary| {
                    let next = Progress::CreditScore {
                        name: name.clone(),
                        loan_amount: *loan_amount,
                        salary,
                    };
                    Accepted::Next(next, "Thank you for sharing that information.".to_string())
                })
            }
            Progress::CreditScore {
                name,
                loan_amount,
                salary,
            } => validation::parse_credit_score(input).map(|credit_score| {
                let next = Progress::Purpose {
                    name: name.clone(),
                    loan_amount: *loan_amount,
                    salary: *salary,
                    credit_score,
                };
                Accepted::Next(next, "Perfect! Almost done.".to_string())
            }),
            Progress::Purpose {
                name,
                loan_amount,
                salary,
                credit_score,
            } => validation::parse_purpose(input).map(|loan_purpose| {
                Accepted::Done(LoanApplication {
                    name: name.clone(),
                    loan_amount: *loan_amount,
                    salary: *salary,
                    credit_score: *credit_score,
                    loan_purpose,
                })
            }),
        };

        match accepted {
            Ok(Accepted::Next(progress, reply)) => {
                self.progress = progress;
                let messages = vec![
                    BotMessage::new(reply, Pause::Short),
                    BotMessage::new(self.prompt(), Pause::Long),
                ];
                FlowOutcome::Advanced {
                    flow: self,
                    messages,
                }
            }
            Ok(Accepted::Done(application)) => FlowOutcome::Completed {
                application,
                messages: vec![
                    BotMessage::new("Excellent! I have all the information I need. 🎉", Pause::Short),
                    BotMessage::new(
                        "Let me analyze your application and prepare your loan eligibility report...",
                        Pause::Long,
                    ),
                ],
            },
            Err(error) => {
                let message = BotMessage::new(error.to_string(), Pause::Short);
                FlowOutcome::Rejected {
                    flow: self,
                    error,
                    message,
                }
            }
        }
    }
}
