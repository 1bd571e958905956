//! The grid runtime: runs `update`, executes commands, notifies the host

use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use crate::clipboard::ClipboardBackend;
use crate::commands::Cmd;
use crate::config::GridConfig;
use crate::grid::{CellPosition, Grid};
use crate::keymap::{KeyContext, Keymap, Keystroke, Modifiers};
use crate::messages::{ClipboardMsg, EditMsg, Msg, PointerMsg, SelectionMsg};
use crate::model::GridModel;
use crate::update::update;

use super::click::ClickTracker;
use super::observer::GridObserver;

/// A grid editor bound to a clipboard backend and a host observer
///
/// Hosts feed input through the typed methods (or raw [`Msg`]s via
/// [`GridRuntime::dispatch`]) and call [`GridRuntime::tick`] when
/// [`GridRuntime::next_deadline`] passes.
pub struct GridRuntime<C: ClipboardBackend, O: GridObserver> {
    model: GridModel,
    keymap: Keymap,
    clipboard: C,
    observer: O,
    clicks: ClickTracker,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl<C: ClipboardBackend, O: GridObserver> GridRuntime<C, O> {
    pub fn new(grid: Grid, config: GridConfig, keymap: Keymap, clipboard: C, observer: O) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model: GridModel::new(grid, config),
            keymap,
            clipboard,
            observer,
            clicks: ClickTracker::default(),
            msg_tx,
            msg_rx,
        }
    }

    pub fn model(&self) -> &GridModel {
        &self.model
    }

    pub fn grid(&self) -> &Grid {
        &self.model.grid
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn clipboard_mut(&mut self) -> &mut C {
        &mut self.clipboard
    }

    /// Sender for messages completed elsewhere (e.g. an async clipboard read)
    ///
    /// Queued messages are processed on the next dispatch.
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Run one message and everything it triggers
    ///
    /// Returns whether the host should redraw.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        let mut redraw = false;
        let mut next = Some(msg);
        while let Some(msg) = next {
            if let Some(cmd) = update(&mut self.model, msg) {
                redraw |= self.process_cmd(cmd);
            }
            next = self.msg_rx.try_recv().ok();
        }
        redraw
    }

    /// Execute a command, returning whether it needs a redraw
    fn process_cmd(&mut self, cmd: Cmd) -> bool {
        let redraw = cmd.needs_redraw();
        match cmd {
            Cmd::None | Cmd::Redraw => {}
            Cmd::CellChanged { row, col, value } => {
                self.observer.on_cell_change(row, col, &value);
            }
            Cmd::DataChanged(grid) => self.observer.on_data_change(&grid),
            Cmd::SelectionChanged(cells) => self.observer.on_selection_change(&cells),
            Cmd::WriteClipboard(text) => {
                if let Err(e) = self.clipboard.set_text(&text) {
                    let _ = self
                        .msg_tx
                        .send(Msg::Clipboard(ClipboardMsg::WriteFailed(e)));
                }
            }
            Cmd::ReadClipboard => {
                let result = self.clipboard.get_text();
                let _ = self
                    .msg_tx
                    .send(Msg::Clipboard(ClipboardMsg::PasteText(result)));
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
        redraw
    }

    /// Context for conditional keybindings
    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            editing: self.model.is_editing(),
            has_selection: !self.model.selection.cells.is_empty(),
            has_active_cell: self.model.selection.active.is_some(),
        }
    }

    /// Handle a key press
    ///
    /// Bound keystrokes run their command. Otherwise `text` (or the key's own
    /// character) is typed: into the open editor, or replacing the active
    /// cell's content. Returns whether the key was consumed.
    pub fn handle_key(&mut self, keystroke: Keystroke, text: Option<&str>) -> bool {
        let ctx = self.key_context();
        if let Some(command) = self.keymap.lookup_with_context(&keystroke, Some(&ctx)) {
            tracing::debug!(target: "keymap", %keystroke, ?command, "bound key");
            for msg in command.to_msgs() {
                self.dispatch(msg);
            }
            return true;
        }

        if keystroke.mods.is_chord() {
            return false;
        }
        let typed: String = match text {
            Some(text) => text.to_string(),
            None => match keystroke.key.typed_char() {
                Some(c) => c.to_string(),
                None => return false,
            },
        };
        let mut chars = typed.chars().filter(|c| !c.is_control());
        let Some(first) = chars.next() else {
            return false;
        };

        if self.model.is_editing() {
            self.dispatch(Msg::Edit(EditMsg::InsertChar(first)));
        } else {
            self.dispatch(Msg::Edit(EditMsg::StartWithChar(first)));
        }
        for c in chars {
            self.dispatch(Msg::Edit(EditMsg::InsertChar(c)));
        }
        true
    }

    /// Button press over a cell; a quick second press also double-clicks
    pub fn pointer_down(&mut self, cell: CellPosition, mods: Modifiers, at: Instant) -> bool {
        let count = self.clicks.track_click(cell, at);
        let mut redraw = self.dispatch(Msg::Pointer(PointerMsg::Down { cell, mods, at }));
        if count == 2 {
            redraw |= self.dispatch(Msg::Pointer(PointerMsg::DoubleClick { cell, mods }));
        }
        redraw
    }

    pub fn pointer_move(&mut self, cell: CellPosition, at: Instant) -> bool {
        self.dispatch(Msg::Pointer(PointerMsg::Move { cell, at }))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.dispatch(Msg::Pointer(PointerMsg::Up))
    }

    pub fn pointer_leave(&mut self, button_held: bool) -> bool {
        self.dispatch(Msg::Pointer(PointerMsg::Leave { button_held }))
    }

    pub fn shift_pressed(&mut self) -> bool {
        self.dispatch(Msg::Selection(SelectionMsg::ShiftPressed))
    }

    pub fn shift_released(&mut self, at: Instant) -> bool {
        self.dispatch(Msg::Selection(SelectionMsg::ShiftReleased { at }))
    }

    /// The cell editor lost focus
    pub fn blur(&mut self) -> bool {
        self.dispatch(Msg::Edit(EditMsg::Blur))
    }

    /// Fire due timers
    pub fn tick(&mut self, now: Instant) -> bool {
        self.dispatch(Msg::Tick(now))
    }

    /// When the host should next call [`GridRuntime::tick`]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.model.next_deadline()
    }

    /// Replace the payload (history is discarded)
    pub fn load(&mut self, grid: Grid) -> bool {
        self.clicks.reset();
        self.dispatch(Msg::Load(grid))
    }

    /// Tear down transient state; pending timers never fire
    pub fn unmount(&mut self) {
        self.clicks.reset();
        self.dispatch(Msg::Unmount);
    }

    /// Consume the runtime, returning the observer and final grid
    pub fn into_parts(self) -> (Grid, C, O) {
        (self.model.grid, self.clipboard, self.observer)
    }
}

impl<C: ClipboardBackend + std::fmt::Debug, O: GridObserver + std::fmt::Debug> std::fmt::Debug
    for GridRuntime<C, O>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridRuntime")
            .field("model", &self.model)
            .field("keymap_bindings", &self.keymap.len())
            .field("clipboard", &self.clipboard)
            .field("observer", &self.observer)
            .finish()
    }
}
