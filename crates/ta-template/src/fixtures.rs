// fixtures.rs — Shared domain-object views for the unit tests.
//
// Thin TemplateObject implementations over a small slice of the TA model,
// with deliberately tempting unsafe attributes (_token, _api_key, workspace)
// so the tests can prove they stay unreachable.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::kind::{FieldValue, KindTag, TemplateObject};

pub(crate) fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
}

pub(crate) struct UserView {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub bot: bool,
    pub token: String,
}

impl UserView {
    pub fn named(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            display_name: name.to_string(),
            bot: false,
            token: "tok-aaaa-bbbb".to_string(),
        }
    }
}

impl TemplateObject for UserView {
    fn kind(&self) -> KindTag {
        KindTag::User
    }

    fn attr(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "display_name" => Some(FieldValue::Text(self.display_name.clone())),
            "bot" => Some(FieldValue::Bool(self.bot)),
            "created_at" => Some(FieldValue::Timestamp(fixed_time())),
            "_token" => Some(FieldValue::Text(self.token.clone())),
            _ => None,
        }
    }

    fn display(&self) -> String {
        self.display_name.clone()
    }
}

/// A filesystem handle from outside the TA object model.
pub(crate) struct WorkspaceDir {
    pub path: String,
}

impl WorkspaceDir {
    pub fn at(path: &str) -> Self {
        Self {
            path: path.to_string(),
        }
    }
}

impl TemplateObject for WorkspaceDir {
    fn kind(&self) -> KindTag {
        KindTag::Foreign("fs")
    }

    fn attr(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "path" => Some(FieldValue::Text(self.path.clone())),
            _ => None,
        }
    }

    fn display(&self) -> String {
        self.path.clone()
    }
}

pub(crate) struct AgentView {
    pub id: Uuid,
    pub name: String,
    pub model: String,
    pub api_key: String,
    pub workspace: WorkspaceDir,
}

impl AgentView {
    pub fn named(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            model: "sonnet".to_string(),
            api_key: "sk-secret".to_string(),
            workspace: WorkspaceDir::at("/srv/ta/workspace"),
        }
    }
}

impl TemplateObject for AgentView {
    fn kind(&self) -> KindTag {
        KindTag::Agent
    }

    fn attr(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "model" => Some(FieldValue::Text(self.model.clone())),
            "created_at" => Some(FieldValue::Timestamp(fixed_time())),
            "workspace" => Some(FieldValue::Object(&self.workspace)),
            "_api_key" => Some(FieldValue::Text(self.api_key.clone())),
            _ => None,
        }
    }

    fn display(&self) -> String {
        self.name.clone()
    }
}

pub(crate) struct GoalRunView {
    pub id: Uuid,
    pub title: String,
    pub state: String,
    pub agent: AgentView,
    pub staging_dir: String,
}

impl GoalRunView {
    pub fn titled(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            state: "completed".to_string(),
            agent: AgentView::named("coder"),
            staging_dir: "/srv/ta/staging/goal-1".to_string(),
        }
    }
}

impl TemplateObject for GoalRunView {
    fn kind(&self) -> KindTag {
        KindTag::GoalRun
    }

    fn attr(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(self.id)),
            "title" => Some(FieldValue::Text(self.title.clone())),
            "state" => Some(FieldValue::Text(self.state.clone())),
            "agent" => Some(FieldValue::Object(&self.agent)),
            "created_at" => Some(FieldValue::Timestamp(fixed_time())),
            "updated_at" => Some(FieldValue::Timestamp(fixed_time())),
            "staging_dir" => Some(FieldValue::Text(self.staging_dir.clone())),
            _ => None,
        }
    }

    fn display(&self) -> String {
        self.title.clone()
    }
}

pub(crate) struct ChannelView {
    pub id: Uuid,
    pub name: String,
    pub topic: String,
}

impl ChannelView {
    pub fn named(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            topic: "goal updates".to_string(),
        }
    }
}

impl TemplateObject for ChannelView {
    fn kind(&self) -> KindTag {
        KindTag::Channel
    }

    fn attr(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(self.id)),
            "name" => Some(FieldValue::Text(self.name.clone())),
            "topic" => Some(FieldValue::Text(self.topic.clone())),
            "created_at" => Some(FieldValue::Timestamp(fixed_time())),
            _ => None,
        }
    }

    fn display(&self) -> String {
        format!("#{}", self.name)
    }
}

pub(crate) struct MessageView {
    pub id: Uuid,
    pub author: UserView,
    pub channel: ChannelView,
}

impl MessageView {
    pub fn from_author(author: UserView) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            channel: ChannelView::named("goal-updates"),
        }
    }
}

impl TemplateObject for MessageView {
    fn kind(&self) -> KindTag {
        KindTag::Message
    }

    fn attr(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "id" => Some(FieldValue::Id(self.id)),
            "author" => Some(FieldValue::Object(&self.author)),
            "channel" => Some(FieldValue::Object(&self.channel)),
            "created_at" => Some(FieldValue::Timestamp(fixed_time())),
            _ => None,
        }
    }

    fn display(&self) -> String {
        format!("message from {}", self.author.display_name)
    }
}
