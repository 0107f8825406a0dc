//! Literal request fixtures and expected values for the service contract.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Model the health endpoint must list among its services by default.
pub const DEFAULT_EXPECTED_MODEL: &str = "OpenAI GPT-4";

/// Template ids the templates endpoint must always offer.
pub const EXPECTED_TEMPLATE_IDS: [&str; 5] = [
    "todo-app",
    "dashboard",
    "landing-page",
    "chat-app",
    "blog-platform",
];

/// React snippet submitted to the preview endpoint.
pub const PREVIEW_SNIPPET: &str = r#"
import React, { useState } from 'react';

function TodoApp() {
  const [todos, setTodos] = useState([]);
  const [input, setInput] = useState('');

  const addTodo = () => {
    if (input.trim()) {
      setTodos([...todos, { id: Date.now(), text: input, completed: false }]);
      setInput('');
    }
  };

  return (
    <div className="p-4">
      <h1 className="text-2xl font-bold mb-4">Todo App</h1>
      <div className="mb-4">
        <input
          type="text"
          value={input}
          onChange={(e) => setInput(e.target.value)}
          className="border p-2 mr-2"
          placeholder="Add a todo..."
        />
        <button onClick={addTodo} className="bg-blue-500 text-white p-2 rounded">
          Add Todo
        </button>
      </div>
      <ul>
        {todos.map(todo => (
          <li key={todo.id} className="mb-2">
            {todo.text}
          </li>
        ))}
      </ul>
    </div>
  );
}

export default TodoApp;
"#;

/// Kind of project the generator is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// A single UI component.
    Component,
    /// A frontend application.
    Frontend,
    /// A backend API.
    Backend,
    /// Frontend plus backend.
    Fullstack,
}

impl ProjectType {
    /// Wire value of the project type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Fullstack => "fullstack",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Natural-language prompt; `None` exercises the validation path.
    pub message: Option<String>,
    /// Requested project type.
    pub project_type: ProjectType,
}

impl GenerateRequest {
    /// Creates a payload with a prompt.
    #[must_use]
    pub fn new(message: impl Into<String>, project_type: ProjectType) -> Self {
        Self {
            message: Some(message.into()),
            project_type,
        }
    }

    /// Creates a payload without a prompt.
    #[must_use]
    pub const fn without_message(project_type: ProjectType) -> Self {
        Self {
            message: None,
            project_type,
        }
    }

    /// JSON body with the service's camelCase keys; an absent prompt is omitted.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(message) = &self.message {
            body.insert("message".to_string(), Value::String(message.clone()));
        }
        body.insert(
            "projectType".to_string(),
            Value::String(self.project_type.as_str().to_string()),
        );
        Value::Object(body)
    }
}

/// Payload of `POST /preview`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewRequest {
    /// Code to preview; `None` sends an empty object.
    pub code: Option<String>,
}

impl PreviewRequest {
    /// Creates a payload carrying `code`.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }

    /// JSON body of the request.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(code) = &self.code {
            body.insert("code".to_string(), Value::String(code.clone()));
        }
        Value::Object(body)
    }
}

/// A named generation fixture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Name shown in results, e.g. "Backend API".
    pub name: &'static str,
    /// Request payload.
    pub payload: GenerateRequest,
}

/// The four generation variants, one per project type.
#[must_use]
pub fn generation_cases() -> Vec<TestCase> {
    vec![
        TestCase {
            name: "Component Generation",
            payload: GenerateRequest::new(
                "Create a simple todo component with add, delete, and toggle functionality",
                ProjectType::Component,
            ),
        },
        TestCase {
            name: "Frontend Dashboard",
            payload: GenerateRequest::new(
                "Build a dashboard with charts and user analytics",
                ProjectType::Frontend,
            ),
        },
        TestCase {
            name: "Backend API",
            payload: GenerateRequest::new(
                "Create a REST API for user management",
                ProjectType::Backend,
            ),
        },
        TestCase {
            name: "Fullstack App",
            payload: GenerateRequest::new(
                "Build a complete blog application",
                ProjectType::Fullstack,
            ),
        },
    ]
}
