//! Step navigation for the project creation wizard.
//!
//! Five fixed steps are walked in order. Each step also has a route path so
//! an application can keep the wizard in sync with its router:
//!
//! ```rust
//! use tenderboard::wizard::{Model, StepStatus};
//!
//! let mut wizard = Model::new();
//! assert!(wizard.is_first());
//! wizard.next();
//! wizard.next();
//! assert_eq!(wizard.current_step().path, "/projects/add/step-3");
//! assert_eq!(wizard.status(0), StepStatus::Completed);
//! assert_eq!(wizard.status(4), StepStatus::Upcoming);
//!
//! wizard.go_to(9); // ignored
//! assert_eq!(wizard.current(), 2);
//! ```

use crate::key::{self, Binding, KeyMap};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use tracing::debug;

/// One wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Stable identifier.
    pub id: &'static str,
    /// Short title.
    pub label: &'static str,
    /// What the step is for.
    pub description: &'static str,
    /// Route of the step.
    pub path: &'static str,
}

/// The project creation steps, in order.
pub const PROJECT_STEPS: [Step; 5] = [
    Step {
        id: "step-1",
        label: "Basic information",
        description: "Project context, goals and delivery framework.",
        path: "/projects/add/step-1",
    },
    Step {
        id: "step-2",
        label: "Location",
        description: "Where the project takes place, for site follow-up and coordination.",
        path: "/projects/add/step-2",
    },
    Step {
        id: "step-3",
        label: "Planning",
        description: "The project periods, for mobilisation and validation.",
        path: "/projects/add/step-3",
    },
    Step {
        id: "step-4",
        label: "Initial files",
        description: "Quotes, plans and technical documents.",
        path: "/projects/add/step-4",
    },
    Step {
        id: "step-5",
        label: "Services",
        description: "The services required by the project.",
        path: "/projects/add/step-5",
    },
];

/// Position of a step relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Before the current step.
    Completed,
    /// The current step.
    Active,
    /// After the current step.
    Upcoming,
}

/// Key bindings of the wizard.
#[derive(Debug, Clone)]
pub struct WizardKeyMap {
    /// Next step.
    pub next: Binding,
    /// Previous step.
    pub previous: Binding,
    /// Quit.
    pub quit: Binding,
}

impl Default for WizardKeyMap {
    fn default() -> Self {
        Self {
            next: Binding::new(vec![KeyCode::Right, KeyCode::Char('l'), KeyCode::Enter])
                .with_help("→/enter", "next"),
            previous: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')]).with_help("←", "previous"),
            quit: key::new_binding(vec![key::with_keys_str(&["q", "ctrl+c"])]).with_help("q", "quit"),
        }
    }
}

impl KeyMap for WizardKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.previous, &self.next, &self.quit]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.previous, &self.next], vec![&self.quit]]
    }
}

/// Styles of the step list.
#[derive(Debug, Clone)]
pub struct WizardStyles {
    /// Completed steps.
    pub completed: Style,
    /// The current step.
    pub active: Style,
    /// Steps not reached yet.
    pub upcoming: Style,
    /// Description of the current step.
    pub description: Style,
    /// Help line.
    pub help: Style,
}

impl Default for WizardStyles {
    fn default() -> Self {
        let subdued = AdaptiveColor {
            Light: "#A49FA5",
            Dark: "#777777",
        };
        Self {
            completed: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#04B575",
            }),
            active: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#EE6FF8",
                Dark: "#EE6FF8",
            }),
            upcoming: Style::new().foreground(subdued.clone()),
            description: Style::new().padding_left(2),
            help: Style::new().foreground(subdued),
        }
    }
}

/// Wizard navigation state.
#[derive(Debug, Clone)]
pub struct Model {
    steps: Vec<Step>,
    current: usize,
    /// Key bindings.
    pub keymap: WizardKeyMap,
    /// Styles.
    pub styles: WizardStyles,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// A wizard over [`PROJECT_STEPS`], on the first step.
    pub fn new() -> Self {
        Self {
            steps: PROJECT_STEPS.to_vec(),
            current: 0,
            keymap: WizardKeyMap::default(),
            styles: WizardStyles::default(),
        }
    }

    /// All steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// 0-based index of the current step.
    pub fn current(&self) -> usize {
        self.current
    }

    /// The current step.
    pub fn current_step(&self) -> &Step {
        &self.steps[self.current]
    }

    /// Reports whether the current step is the first.
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    /// Reports whether the current step is the last.
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    /// Advances one step; no-op on the last step.
    pub fn next(&mut self) {
        if !self.is_last() {
            self.go_to(self.current + 1);
        }
    }

    /// Goes back one step; no-op on the first step.
    pub fn previous(&mut self) {
        if !self.is_first() {
            self.go_to(self.current - 1);
        }
    }

    /// Jumps to step `index`. Out-of-range indices are ignored.
    pub fn go_to(&mut self, index: usize) {
        if index < self.steps.len() && index != self.current {
            debug!(step = self.steps[index].id, "wizard step changed");
            self.current = index;
        }
    }

    /// Jumps to the step whose route is `path`. Returns whether one matched.
    pub fn go_to_path(&mut self, path: &str) -> bool {
        match self.steps.iter().position(|s| s.path == path) {
            Some(index) => {
                self.go_to(index);
                true
            }
            None => false,
        }
    }

    /// Status of step `index` relative to the current step.
    pub fn status(&self, index: usize) -> StepStatus {
        match index.cmp(&self.current) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Upcoming,
        }
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.quit.matches(key_msg) {
            return Some(bubbletea_rs::quit());
        } else if self.keymap.next.matches(key_msg) {
            self.next();
        } else if self.keymap.previous.matches(key_msg) {
            self.previous();
        } else if let KeyCode::Char(c) = key_msg.key {
            if let Some(n) = c.to_digit(10) {
                if n >= 1 {
                    self.go_to(n as usize - 1);
                }
            }
        }
        None
    }

    fn view(&self) -> String {
        let mut lines: Vec<String> = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let (mark, style) = match self.status(i) {
                    StepStatus::Completed => ("✓", &self.styles.completed),
                    StepStatus::Active => ("●", &self.styles.active),
                    StepStatus::Upcoming => ("○", &self.styles.upcoming),
                };
                style.clone().render(&format!("{mark} {}. {}", i + 1, step.label))
            })
            .collect();
        lines.push(String::new());
        lines.push(
            self.styles
                .description
                .clone()
                .render(self.current_step().description),
        );
        lines.push(String::new());
        lines.push(
            self.styles
                .help
                .clone()
                .render(&key::help_line(&self.keymap.short_help(), " • ")),
        );
        lines.join("\n")
    }
}
