use crate::{
    config::RuntimeConfiguration, data::student::Student, routes::sse::SseEvent,
    store::StudentStore,
};
use maud::{DOCTYPE, Markup, html};
use std::{ops::Deref, sync::Arc};
use tokio::sync::{
    RwLock,
    broadcast::{Receiver, Sender, channel},
};

#[derive(Clone, Debug)]
pub struct SimsState {
    store: Arc<StudentStore>,
    config: RuntimeConfiguration,
    snapshot: Arc<RwLock<Arc<Vec<Student>>>>,
    sse_events_sender: Sender<SseEvent>,
}

impl SimsState {
    pub fn new(config: RuntimeConfiguration) -> Self {
        let store = StudentStore::new(config.server_config().data_path.clone());
        let (tx, _rx) = channel(16);

        Self {
            store: Arc::new(store),
            config,
            snapshot: Arc::default(),
            sse_events_sender: tx,
        }
    }

    #[allow(clippy::unused_self)] //in case self is ever needed :), and to allow direct html! usage
    pub fn render(&self, markup: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8" {}
                    meta name="viewport" content="width=device-width, initial-scale=1.0" {}
                    script src="https://unpkg.com/htmx.org@2.0.4" integrity="sha384-HGfztofotfshcF7+8n44JQL2oJmowVChPTg48S+jvZoztPfvwD79OC/LTtG6dMp+" crossorigin="anonymous" {}
                    script src="https://unpkg.com/htmx-ext-sse@2.2.3" integrity="sha384-Y4gc0CK6Kg+hmulDc6rZPJu0tqvk7EWlih0Oh+2OkAi1ZDlCbBDCQEE2uVk472Ky" crossorigin="anonymous" {}
                    script src="https://cdn.jsdelivr.net/npm/@tailwindcss/browser@4" {}
                    title { "Student Information Management System" }
                }
                body hx-ext="sse" class="bg-slate-50 min-h-screen text-slate-800" {
                    div id="toast" class="fixed top-4 right-4 z-50 flex flex-col space-y-2" {}
                    (markup)
                }
            }
        }
    }

    pub const fn config(&self) -> &RuntimeConfiguration {
        &self.config
    }

    /// Replaces the cached copy of the student list wholesale.
    pub async fn replace_snapshot(&self, students: Vec<Student>) -> Arc<Vec<Student>> {
        let students = Arc::new(students);
        *self.snapshot.write().await = students.clone();
        students
    }

    pub async fn snapshot(&self) -> Arc<Vec<Student>> {
        self.snapshot.read().await.clone()
    }

    pub fn subscribe_to_sse_feed(&self) -> Receiver<SseEvent> {
        self.sse_events_sender.subscribe()
    }

    pub fn send_sse_event(&self, event: SseEvent) {
        let _ = self.sse_events_sender.send(event);
    }
}

impl Deref for SimsState {
    type Target = StudentStore;

    fn deref(&self) -> &Self::Target {
        &self.store
    }
}
