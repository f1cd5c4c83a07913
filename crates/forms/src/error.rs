use coursework_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum FormsError {
    #[error("Unknown form '{0}'. Must be one of: course, group, rubric_criterion, password_change")]
    UnknownForm(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
