use super::input::AppTextArea;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Open,
    SaveAs,
    InsertImage,
}

impl PromptKind {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PromptKind::Open => " OPEN NOTE ",
            PromptKind::SaveAs => " SAVE AS ",
            PromptKind::InsertImage => " INSERT IMAGE ",
        }
    }

    #[must_use]
    pub fn hint(self) -> &'static str {
        match self {
            PromptKind::Open => "Path of a markdown note",
            PromptKind::SaveAs => "Path to write the note to",
            PromptKind::InsertImage => "Path of a png, jpg, gif, webp, svg or bmp file",
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct PromptState<'a> {
    pub kind: PromptKind,
    pub text_area: AppTextArea<'a>,
}

impl PromptState<'_> {
    #[must_use]
    pub fn new(kind: PromptKind, initial: &str) -> Self {
        Self {
            kind,
            text_area: AppTextArea::with_text(initial),
        }
    }
}
