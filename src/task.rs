use crate::error::TowerError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskType {
    /// Flying, or parked at another airport.
    Away,
    /// Stationary at a gate, not loading.
    Wait,
    /// Loading cargo or boarding passengers at a gate.
    Load,
    /// Holding on the taxiway for a takeoff slot.
    Takeoff,
    /// Circling the airport for a landing slot.
    Land,
}

impl TaskType {
    pub fn description(&self) -> &'static str {
        match self {
            TaskType::Away => "Flying outside the airport",
            TaskType::Wait => "Waiting idle at gate",
            TaskType::Load => "Loading at gate",
            TaskType::Takeoff => "Waiting in queue to take off",
            TaskType::Land => "Waiting in queue to land",
        }
    }

    /// Whether an aircraft performing this task needs a gate.
    pub fn is_at_gate(&self) -> bool {
        matches!(self, TaskType::Wait | TaskType::Load)
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskType::Away => "AWAY",
            TaskType::Wait => "WAIT",
            TaskType::Load => "LOAD",
            TaskType::Takeoff => "TAKEOFF",
            TaskType::Land => "LAND",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for TaskType {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AWAY" => Ok(TaskType::Away),
            "WAIT" => Ok(TaskType::Wait),
            "LOAD" => Ok(TaskType::Load),
            "TAKEOFF" => Ok(TaskType::Takeoff),
            "LAND" => Ok(TaskType::Land),
            other => Err(TowerError::InvalidTask(format!("unknown task type {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Task {
    kind: TaskType,
    load_percent: u8,
}

impl Task {
    pub fn new(kind: TaskType) -> Task {
        Task {
            kind,
            load_percent: 0,
        }
    }

    /// A LOAD task filling `load_percent` of the aircraft's cargo capacity.
    pub fn load(load_percent: u8) -> Result<Task, TowerError> {
        if load_percent > 100 {
            return Err(TowerError::InvalidTask(format!(
                "load percent {} exceeds 100",
                load_percent
            )));
        }
        Ok(Task {
            kind: TaskType::Load,
            load_percent,
        })
    }

    pub fn kind(&self) -> TaskType {
        self.kind
    }

    pub fn load_percent(&self) -> u8 {
        self.load_percent
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TaskType::Load => write!(f, "{} at {}%", self.kind, self.load_percent),
            _ => write!(f, "{}", self.kind),
        }
    }
}

/// Parses `WAIT`, `AWAY` or `LOAD@60` style task descriptions.
impl FromStr for Task {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('@') {
            Some((kind, percent)) => {
                if kind.parse::<TaskType>()? != TaskType::Load {
                    return Err(TowerError::InvalidTask(format!(
                        "only LOAD accepts a load percent, got {}",
                        s
                    )));
                }
                let percent = percent
                    .trim()
                    .parse::<u8>()
                    .map_err(|e| TowerError::InvalidTask(format!("{}: {}", s, e)))?;
                Task::load(percent)
            }
            None => Ok(Task::new(s.parse()?)),
        }
    }
}

/// Circular list of tasks. Only the cursor moves, the tasks never change.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskList {
    tasks: Vec<Task>,
    current: usize,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Result<TaskList, TowerError> {
        if tasks.is_empty() {
            return Err(TowerError::EmptyTaskList);
        }
        Ok(TaskList { tasks, current: 0 })
    }

    pub fn current_task(&self) -> &Task {
        &self.tasks[self.current]
    }

    pub fn next_task(&self) -> &Task {
        &self.tasks[(self.current + 1) % self.tasks.len()]
    }

    pub fn move_to_next_task(&mut self) {
        self.current = (self.current + 1) % self.tasks.len();
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

impl fmt::Display for TaskList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TaskList currently on {} [{}/{}]",
            self.current_task().kind(),
            self.current + 1,
            self.tasks.len()
        )
    }
}

/// Parses a comma separated list such as `WAIT,LOAD@60,TAKEOFF,AWAY,LAND`.
impl FromStr for TaskList {
    type Err = TowerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tasks = s
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(|part| part.trim().parse::<Task>())
            .collect::<Result<Vec<Task>, TowerError>>()?;
        TaskList::new(tasks)
    }
}
