//! Session controller: the actions behind the UI.
//!
//! Starting a session:
//! 1. Resolve name (custom or generated) and parameters from the form
//! 2. Ask the shell for a session config id
//! 3. Clear the log and publish the id (rolled back if the start fails)
//! 4. Start the backend process for that id
//! 5. Publish config, mark connected, record history
//!
//! Host events are drained by the app each frame and passed to
//! `handle_event`; only events for the current session touch the store.

use octo_types::{
    Result, UiError,
    connection::Connection,
    event::{HostEvent, OutputKind, SessionOutput},
    message::ChatMessage,
    session::{
        Session, SessionConfig, SessionForm, SessionHistoryEntry, DEFAULT_ROLE, DEFAULT_TEMPERATURE,
    },
};
use crate::backend::{SessionClient, SessionParams};
use crate::directory::DirectoryAccess;
use crate::naming::generate_session_name;
use crate::store::UiStore;

pub struct SessionController {
    pub store: UiStore,
    client: SessionClient,
    directories: DirectoryAccess,
}

impl SessionController {
    pub fn new(store: UiStore, client: SessionClient, directories: DirectoryAccess) -> Self {
        Self {
            store,
            client,
            directories,
        }
    }

    /// Fill an empty form directory from the host
    pub async fn init_directory(&self) {
        if !self.store.session_form.with(|f| f.directory.trim().is_empty()) {
            return;
        }
        let directory = self.directories.current_directory().await;
        self.store.session_form.update(|f| f.directory = directory);
    }

    /// Let the user pick the working directory; the choice lands in the form
    pub async fn browse_directory(&self) -> Result<String> {
        let directory = self.directories.select_directory().await?;
        let picked = directory.clone();
        self.store.session_form.update(|f| f.directory = picked);
        Ok(directory)
    }

    /// Create and start a session from the current form
    pub async fn start_new_session(&self) -> Result<Session> {
        let form = self.store.session_form.get();
        let params = params_from_form(&form)?;
        let name = generate_session_name(&params.directory, Some(&form.session_name));

        let id = self.client.create_session(Some(&name), &params).await?;
        self.activate(id, name, params, None).await
    }

    /// Resume a past session, reusing its name, directory and parameters.
    /// Entries saved without a config take their parameters from the form.
    pub async fn resume_session(&self, entry: &SessionHistoryEntry) -> Result<Session> {
        let params = match &entry.config {
            Some(config) => SessionParams {
                directory: entry.directory.clone(),
                model: config.model.clone(),
                temperature: Some(config.temperature),
                max_tokens: config.max_tokens,
                role: Some(config.role.clone()),
            },
            None => {
                let form = self.store.session_form.get();
                SessionParams {
                    directory: entry.directory.clone(),
                    model: form.model(),
                    temperature: Some(form.temperature),
                    max_tokens: form.max_tokens()?,
                    role: Some(form.role()),
                }
            }
        };

        let id = self.client.resume_session(&entry.name, &params).await?;
        self.activate(id, entry.name.clone(), params, Some(entry)).await
    }

    async fn activate(
        &self,
        id: String,
        name: String,
        params: SessionParams,
        resumed: Option<&SessionHistoryEntry>,
    ) -> Result<Session> {
        if let Err(e) = self.stop_session().await {
            log::warn!("Failed to stop previous session: {}", e);
        }

        // The shell emits output for the new id before the start command
        // resolves; publish the id first so handle_event keeps it.
        self.store.clear_messages();
        self.store.current_session_id.set(Some(id.clone()));

        if let Err(e) = self.client.start_process(&id).await {
            self.store.current_session_id.set(None);
            self.store.clear_messages();
            return Err(e);
        }

        let config = SessionConfig {
            name: if resumed.is_some() { None } else { Some(name.clone()) },
            resume: resumed.map(|entry| entry.name.clone()),
            model: params.model,
            temperature: params.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: params.max_tokens,
            role: params.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            directory: params.directory.clone(),
        };
        let session = Session {
            id: Some(id),
            config: Some(config.clone()),
            directory: params.directory,
            name: name.clone(),
        };

        self.store.current_session_config.set(Some(config));
        self.store.set_connection(Connection::connected_to(&name));

        let history_entry = SessionHistoryEntry::from_session(&session);
        match resumed {
            Some(previous) => self.store.replace_session(previous, history_entry),
            None => self.store.record_session(history_entry),
        }

        // Banner heads the log even if output already arrived
        self.store.messages.update(|log| {
            log.insert(0, ChatMessage::system(format!("Session started: {}", name)))
        });

        log::info!("Session {} started", name);
        Ok(session)
    }

    /// Send user input to the running session. Blank input is ignored.
    pub async fn send_message(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        let id = self.store.current_session_id.get().ok_or(UiError::NoSession)?;

        self.store.finish_stream();
        self.store.push_message(ChatMessage::user(text));
        self.client.send_message(&id, text).await
    }

    pub async fn stop_session(&self) -> Result<()> {
        let Some(id) = self.store.current_session_id.get() else {
            return Ok(());
        };
        let result = self.client.stop_process(&id).await;

        self.store.finish_stream();
        self.store.current_session_id.set(None);
        self.store.set_connection(Connection::disconnected());
        log::info!("Session {} stopped", id);
        result
    }

    /// Apply one host event to the store
    pub fn handle_event(&self, event: HostEvent) {
        let current = self.store.current_session_id.get();
        if current.as_deref() != Some(event.session_id()) {
            log::debug!("Ignoring event for session {}", event.session_id());
            return;
        }

        match event {
            HostEvent::Output(output) => self.handle_output(output),
            HostEvent::Ended(_) => {
                self.store.finish_stream();
                self.store.current_session_id.set(None);
                self.store.set_connection(Connection::disconnected());
                self.store.push_message(ChatMessage::system("Session ended"));
            }
        }
    }

    fn handle_output(&self, output: SessionOutput) {
        match output.kind {
            OutputKind::Stdout => self.store.append_stream(&output.content),
            OutputKind::Stderr => self.store.push_message(ChatMessage::system(output.content)),
            OutputKind::Error => {
                self.store.finish_stream();
                self.store
                    .push_message(ChatMessage::system(format!("Error: {}", output.content)));
            }
        }
    }
}

fn params_from_form(form: &SessionForm) -> Result<SessionParams> {
    Ok(SessionParams {
        directory: form.directory()?,
        model: form.model(),
        temperature: Some(form.temperature),
        max_tokens: form.max_tokens()?,
        role: Some(form.role()),
    })
}
