//! Editor actions and input-event translation.
//!
//! `Action` is the closed set of state transitions the reducer accepts;
//! `InputType` is the semantic intent carried by host input events, following
//! the W3C Input Events discriminators. `action_for_input` bridges the two,
//! ignoring the kinds the editor does not model.

use smol_str::SmolStr;

use crate::selection::Selection;

/// Direction of a delete relative to a collapsed caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

/// A state transition dispatched against the current value.
///
/// The action set and the reducer are kept in lockstep: the reducer matches
/// exhaustively, so adding a variant without a transition fails to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The editor surface gained focus.
    Focus,

    /// The editor surface lost focus.
    Blur,

    /// The host reported a new selection, or that none remains.
    SelectionChange { selection: Option<Selection> },

    /// Host-native input rewrote the text node containing the caret.
    ///
    /// `text` is that node's full content after the input settled;
    /// `selection` is the resulting caret or range, whose focus parent
    /// addresses the rewritten node.
    InsertText { text: SmolStr, selection: Selection },

    /// Delete the content spanned by `selection`. A collapsed selection is
    /// first widened by one offset in `direction`.
    DeleteText {
        selection: Selection,
        direction: Direction,
    },
}

/// Semantic intent of a host input event, per the W3C Input Events
/// discriminators the editor distinguishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputType {
    // Insertion
    InsertText,
    InsertReplacementText,
    InsertCompositionText,
    InsertFromPaste,
    InsertFromDrop,
    InsertLineBreak,
    InsertParagraph,

    // Deletion
    DeleteContentBackward,
    DeleteContentForward,
    DeleteWordBackward,
    DeleteWordForward,
    DeleteByCut,
    DeleteContent,

    // History
    HistoryUndo,
    HistoryRedo,

    // Formatting commands; carried through so hosts can inspect them, never
    // translated into actions.
    FormatBold,
    FormatItalic,
    FormatUnderline,

    /// Unrecognized discriminator, kept verbatim.
    Unknown(String),
}

impl InputType {
    /// Parse a host `inputType` discriminator string.
    pub fn parse(raw: &str) -> InputType {
        match raw {
            "insertText" => InputType::InsertText,
            "insertReplacementText" => InputType::InsertReplacementText,
            "insertCompositionText" => InputType::InsertCompositionText,
            "insertFromPaste" => InputType::InsertFromPaste,
            "insertFromDrop" => InputType::InsertFromDrop,
            "insertLineBreak" => InputType::InsertLineBreak,
            "insertParagraph" => InputType::InsertParagraph,
            "deleteContentBackward" => InputType::DeleteContentBackward,
            "deleteContentForward" => InputType::DeleteContentForward,
            "deleteWordBackward" => InputType::DeleteWordBackward,
            "deleteWordForward" => InputType::DeleteWordForward,
            "deleteByCut" => InputType::DeleteByCut,
            "deleteContent" => InputType::DeleteContent,
            "historyUndo" => InputType::HistoryUndo,
            "historyRedo" => InputType::HistoryRedo,
            "formatBold" => InputType::FormatBold,
            "formatItalic" => InputType::FormatItalic,
            "formatUnderline" => InputType::FormatUnderline,
            other => InputType::Unknown(other.to_string()),
        }
    }

    /// Whether this kind carries text the editor applies as an insertion.
    pub fn is_insertion(&self) -> bool {
        matches!(
            self,
            InputType::InsertText
                | InputType::InsertReplacementText
                | InputType::InsertCompositionText
                | InputType::InsertFromPaste
                | InputType::InsertFromDrop
        )
    }

    /// Whether this kind removes content.
    pub fn is_deletion(&self) -> bool {
        matches!(
            self,
            InputType::DeleteContentBackward
                | InputType::DeleteContentForward
                | InputType::DeleteWordBackward
                | InputType::DeleteWordForward
                | InputType::DeleteByCut
                | InputType::DeleteContent
        )
    }
}

/// Translate a host input event into an action.
///
/// `text` is the post-input content of the affected text node (insertions
/// only); `selection` is the event's target range, already resolved to
/// paths. Kinds the editor does not model (structural breaks, history,
/// formatting, unknowns) yield `None` and the event is ignored.
pub fn action_for_input(
    input: &InputType,
    text: Option<&str>,
    selection: Selection,
) -> Option<Action> {
    match input {
        InputType::InsertText
        | InputType::InsertReplacementText
        | InputType::InsertCompositionText
        | InputType::InsertFromPaste
        | InputType::InsertFromDrop => text.map(|text| Action::InsertText {
            text: SmolStr::new(text),
            selection,
        }),
        InputType::DeleteContentBackward
        | InputType::DeleteWordBackward
        | InputType::DeleteByCut => Some(Action::DeleteText {
            selection,
            direction: Direction::Backward,
        }),
        InputType::DeleteContentForward
        | InputType::DeleteWordForward
        | InputType::DeleteContent => Some(Action::DeleteText {
            selection,
            direction: Direction::Forward,
        }),
        InputType::InsertLineBreak
        | InputType::InsertParagraph
        | InputType::HistoryUndo
        | InputType::HistoryRedo
        | InputType::FormatBold
        | InputType::FormatItalic
        | InputType::FormatUnderline
        | InputType::Unknown(_) => None,
    }
}
