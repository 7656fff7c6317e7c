//! Creation dialog state and the gates that enable their create action.
//!
//! Each dialog is an explicit form-state struct. Text edits go through
//! [`FormGate::edit`], which sanitises the input, stores it and recomputes
//! whether the create action is enabled. `submit` repeats the checks in
//! dialog order and reports the first blocking message.

use serde::Serialize;

use crate::entity::{Entity, IngestAction, MediaType};
use crate::error::CoreError;
use crate::ingest::MediaIngestRequest;
use crate::media::MediaSelection;
use crate::naming::split_drive;
use crate::validation::{is_valid_field, sanitize_field, FieldKind};
use crate::version::{is_valid_version, parse_int_version, MIN_VERSION};

/// A text field tracked by a creation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    ProjectName,
    ProjectPath,
    Department,
    Task,
    Product,
    Identifier,
    Aov,
    Version,
    MediaPath,
}

impl FormField {
    /// Allowlist of the field. Version and media path text is parsed
    /// instead of filtered.
    pub fn kind(self) -> Option<FieldKind> {
        match self {
            Self::ProjectName => Some(FieldKind::ProjectName),
            Self::ProjectPath => Some(FieldKind::ProjectPath),
            Self::Department => Some(FieldKind::Department),
            Self::Task => Some(FieldKind::Task),
            Self::Product => Some(FieldKind::Product),
            Self::Identifier => Some(FieldKind::Identifier),
            Self::Aov => Some(FieldKind::Aov),
            Self::Version | Self::MediaPath => None,
        }
    }

    pub fn sanitize(self, text: &str) -> String {
        match self.kind() {
            Some(kind) => sanitize_field(kind, text),
            None => text.to_string(),
        }
    }
}

/// State of a creation dialog.
pub trait CreationForm {
    /// What a successful submit hands to the Core.
    type Output;

    /// Store already sanitised text. Returns `false` for fields the form
    /// does not track.
    fn set_field(&mut self, field: FormField, text: String) -> bool;

    /// `true` when every required field is filled and valid.
    fn can_create(&self) -> bool;

    /// Run the checks in dialog order and build the output.
    fn submit(&self) -> Result<Self::Output, CoreError>;
}

/// Whether the create action of `form` is enabled.
pub fn can_create<F: CreationForm + ?Sized>(form: &F) -> bool {
    form.can_create()
}

/// A location picker is only shown when there is a choice to make.
pub fn show_location_picker(location_count: usize) -> bool {
    location_count >= 2
}

fn blocked(message: &str) -> CoreError {
    CoreError::Validation(message.to_string())
}

fn check(kind: FieldKind, value: &str, message: &str) -> Result<(), CoreError> {
    if is_valid_field(kind, value) {
        Ok(())
    } else {
        Err(blocked(message))
    }
}

/// Department and task are only asked for when the project links media to
/// tasks.
fn check_task_scope(linked_to_tasks: bool, department: &str, task: &str) -> Result<(), CoreError> {
    if linked_to_tasks {
        check(FieldKind::Department, department, "Invalid department.")?;
        check(FieldKind::Task, task, "Invalid task.")?;
    }
    Ok(())
}

fn scope_values(linked_to_tasks: bool, department: &str, task: &str) -> (Option<String>, Option<String>) {
    if linked_to_tasks {
        (Some(department.to_string()), Some(task.to_string()))
    } else {
        (None, None)
    }
}

fn is_absolute_path(path: &str) -> bool {
    let (_, rest) = split_drive(path);
    rest.starts_with(['/', '\\'])
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, Default)]
pub struct CreateProjectForm {
    pub name: String,
    pub path: String,
}

impl CreateProjectForm {
    /// Checks run before the project is handed to the Core.
    pub fn sanity_checks(&self) -> Result<(), CoreError> {
        if self.name.is_empty() {
            return Err(blocked("The project name is invalid."));
        }
        if !is_absolute_path(&self.path) {
            return Err(blocked("The project path is invalid."));
        }
        Ok(())
    }
}

impl CreationForm for CreateProjectForm {
    type Output = NewProject;

    fn set_field(&mut self, field: FormField, text: String) -> bool {
        match field {
            FormField::ProjectName => self.name = text,
            FormField::ProjectPath => self.path = text,
            _ => return false,
        }
        true
    }

    fn can_create(&self) -> bool {
        is_valid_field(FieldKind::ProjectName, &self.name)
            && is_valid_field(FieldKind::ProjectPath, &self.path)
    }

    fn submit(&self) -> Result<NewProject, CoreError> {
        self.sanity_checks()?;
        check(FieldKind::ProjectName, &self.name, "The project name is invalid.")?;
        check(FieldKind::ProjectPath, &self.path, "The project path is invalid.")?;
        Ok(NewProject {
            name: self.name.clone(),
            path: self.path.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub entity: Entity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    pub product: String,
}

#[derive(Debug, Clone)]
pub struct CreateProductForm {
    pub entity: Entity,
    pub linked_to_tasks: bool,
    pub department: String,
    pub task: String,
    pub product: String,
}

impl CreateProductForm {
    pub fn new(entity: Entity, linked_to_tasks: bool) -> Self {
        Self {
            entity,
            linked_to_tasks,
            department: String::new(),
            task: String::new(),
            product: String::new(),
        }
    }
}

impl CreationForm for CreateProductForm {
    type Output = NewProduct;

    fn set_field(&mut self, field: FormField, text: String) -> bool {
        match field {
            FormField::Department => self.department = text,
            FormField::Task => self.task = text,
            FormField::Product => self.product = text,
            _ => return false,
        }
        true
    }

    fn can_create(&self) -> bool {
        self.submit().is_ok()
    }

    fn submit(&self) -> Result<NewProduct, CoreError> {
        check_task_scope(self.linked_to_tasks, &self.department, &self.task)?;
        check(FieldKind::Product, &self.product, "Invalid product.")?;
        let (department, task) = scope_values(self.linked_to_tasks, &self.department, &self.task);
        Ok(NewProduct {
            entity: self.entity.clone(),
            department,
            task,
            product: self.product.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Identifier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewIdentifier {
    pub entity: Entity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    pub identifier: String,
    #[serde(rename = "mediaType")]
    pub media_type: MediaType,
}

#[derive(Debug, Clone)]
pub struct CreateIdentifierForm {
    pub entity: Entity,
    pub linked_to_tasks: bool,
    pub media_type: MediaType,
    pub department: String,
    pub task: String,
    pub identifier: String,
}

impl CreateIdentifierForm {
    pub fn new(entity: Entity, linked_to_tasks: bool, media_type: MediaType) -> Self {
        Self {
            entity,
            linked_to_tasks,
            media_type,
            department: String::new(),
            task: String::new(),
            identifier: String::new(),
        }
    }
}

impl CreationForm for CreateIdentifierForm {
    type Output = NewIdentifier;

    fn set_field(&mut self, field: FormField, text: String) -> bool {
        match field {
            FormField::Department => self.department = text,
            FormField::Task => self.task = text,
            FormField::Identifier => self.identifier = text,
            _ => return false,
        }
        true
    }

    fn can_create(&self) -> bool {
        self.submit().is_ok()
    }

    fn submit(&self) -> Result<NewIdentifier, CoreError> {
        check_task_scope(self.linked_to_tasks, &self.department, &self.task)?;
        check(FieldKind::Identifier, &self.identifier, "Invalid identifier.")?;
        let (department, task) = scope_values(self.linked_to_tasks, &self.department, &self.task);
        Ok(NewIdentifier {
            entity: self.entity.clone(),
            department,
            task,
            identifier: self.identifier.clone(),
            media_type: self.media_type,
        })
    }
}

// ---------------------------------------------------------------------------
// Product version
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewVersion {
    pub entity: Entity,
    pub product: String,
    pub version: u32,
    pub files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Create a product version from files.
#[derive(Debug, Clone)]
pub struct CreateVersionForm {
    pub entity: Entity,
    pub product: String,
    pub version: String,
    pub files: MediaSelection,
    /// Export locations configured for the project, in picker order.
    pub locations: Vec<String>,
    pub location: Option<String>,
}

impl CreateVersionForm {
    pub fn new(entity: Entity, locations: Vec<String>) -> Self {
        let location = locations.first().cloned();
        Self {
            entity,
            product: String::new(),
            version: MIN_VERSION.to_string(),
            files: MediaSelection::empty(),
            locations,
            location,
        }
    }

    pub fn show_location_picker(&self) -> bool {
        show_location_picker(self.locations.len())
    }

    fn version_number(&self) -> Option<u32> {
        parse_int_version(&self.version).filter(|v| is_valid_version(*v))
    }
}

impl CreationForm for CreateVersionForm {
    type Output = NewVersion;

    fn set_field(&mut self, field: FormField, text: String) -> bool {
        match field {
            FormField::Product => self.product = text,
            FormField::Version => self.version = text,
            FormField::MediaPath => self.files = MediaSelection::from_display_text(&text),
            _ => return false,
        }
        true
    }

    fn can_create(&self) -> bool {
        self.submit().is_ok()
    }

    fn submit(&self) -> Result<NewVersion, CoreError> {
        check(FieldKind::Product, &self.product, "Invalid product.")?;
        let version = self.version_number().ok_or_else(|| blocked("Invalid version."))?;
        if !self.files.is_set() {
            return Err(blocked("Invalid media path."));
        }
        Ok(NewVersion {
            entity: self.entity.clone(),
            product: self.product.clone(),
            version,
            files: self.files.paths().to_vec(),
            location: self.location.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Media ingest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IngestMediaForm {
    pub entity: Entity,
    pub linked_to_tasks: bool,
    pub media_type: MediaType,
    pub department: String,
    pub task: String,
    pub identifier: String,
    pub version: String,
    pub aov: String,
    pub media: MediaSelection,
    pub action: IngestAction,
}

impl IngestMediaForm {
    pub fn new(entity: Entity, linked_to_tasks: bool, media_type: MediaType) -> Self {
        Self {
            entity,
            linked_to_tasks,
            media_type,
            department: String::new(),
            task: String::new(),
            identifier: String::new(),
            version: MIN_VERSION.to_string(),
            aov: String::new(),
            media: MediaSelection::empty(),
            action: IngestAction::default(),
        }
    }

    /// The aov field is only shown for 3D renders.
    pub fn shows_aov(&self) -> bool {
        self.media_type.requires_aov()
    }

    /// The action picker is only shown for external media.
    pub fn shows_action(&self) -> bool {
        self.media_type.supports_action()
    }
}

impl CreationForm for IngestMediaForm {
    type Output = MediaIngestRequest;

    fn set_field(&mut self, field: FormField, text: String) -> bool {
        match field {
            FormField::Department => self.department = text,
            FormField::Task => self.task = text,
            FormField::Identifier => self.identifier = text,
            FormField::Version => self.version = text,
            FormField::Aov => self.aov = text,
            FormField::MediaPath => self.media = MediaSelection::from_display_text(&text),
            _ => return false,
        }
        true
    }

    fn can_create(&self) -> bool {
        self.submit().is_ok()
    }

    fn submit(&self) -> Result<MediaIngestRequest, CoreError> {
        check_task_scope(self.linked_to_tasks, &self.department, &self.task)?;
        check(FieldKind::Identifier, &self.identifier, "Invalid identifier.")?;
        let version = parse_int_version(&self.version)
            .filter(|v| is_valid_version(*v))
            .ok_or_else(|| blocked("Invalid version."))?;
        if self.shows_aov() {
            check(FieldKind::Aov, &self.aov, "Invalid aov.")?;
        }
        if !self.media.is_set() {
            return Err(blocked("Invalid media path."));
        }

        let (department, task) = scope_values(self.linked_to_tasks, &self.department, &self.task);
        let request = MediaIngestRequest {
            entity: self.entity.clone(),
            identifier: self.identifier.clone(),
            media_type: self.media_type,
            department,
            task,
            version,
            aov: self.shows_aov().then(|| self.aov.clone()),
            sources: self.media.paths().to_vec(),
            action: self.action,
        };
        request.check(self.linked_to_tasks)?;
        Ok(request)
    }
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

/// Lifecycle of a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState<T> {
    Editing { enabled: bool },
    Accepted(T),
    Rejected,
}

/// Drives a creation form: edits recompute the create action, accept and
/// reject close the dialog.
pub struct FormGate<F: CreationForm> {
    form: F,
    state: GateState<F::Output>,
}

impl<F: CreationForm> FormGate<F> {
    /// The create action starts disabled whatever the form holds.
    pub fn new(form: F) -> Self {
        Self {
            form,
            state: GateState::Editing { enabled: false },
        }
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn state(&self) -> &GateState<F::Output> {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.state, GateState::Editing { enabled: true })
    }

    pub fn is_closed(&self) -> bool {
        !matches!(self.state, GateState::Editing { .. })
    }

    /// A keystroke in a tracked field. Returns whether creation is enabled
    /// afterwards.
    pub fn edit(&mut self, field: FormField, text: &str) -> bool {
        if self.is_closed() {
            tracing::debug!(?field, "Ignoring edit on a closed dialog");
            return false;
        }
        if !self.form.set_field(field, field.sanitize(text)) {
            tracing::debug!(?field, "Field is not tracked by this dialog");
        }
        self.recompute()
    }

    /// A non-text change such as a picker selection or a drop.
    pub fn update(&mut self, change: impl FnOnce(&mut F)) -> bool {
        if self.is_closed() {
            return false;
        }
        change(&mut self.form);
        self.recompute()
    }

    fn recompute(&mut self) -> bool {
        let enabled = self.form.can_create();
        self.state = GateState::Editing { enabled };
        enabled
    }

    /// Submit the form. On failure the dialog stays open with the blocking
    /// message returned.
    pub fn accept(&mut self) -> Result<(), CoreError> {
        if self.is_closed() {
            return Err(CoreError::Conflict("The dialog is already closed".into()));
        }
        let output = self.form.submit()?;
        self.state = GateState::Accepted(output);
        Ok(())
    }

    /// Cancel the dialog without side effects.
    pub fn reject(&mut self) {
        if !self.is_closed() {
            self.state = GateState::Rejected;
        }
    }

    pub fn output(&self) -> Option<&F::Output> {
        match &self.state {
            GateState::Accepted(output) => Some(output),
            _ => None,
        }
    }

    pub fn into_output(self) -> Option<F::Output> {
        match self.state {
            GateState::Accepted(output) => Some(output),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
