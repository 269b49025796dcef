//! # Tab Shell
//!
//! Line-oriented front end: three tabs, one screen each, driven by typed
//! commands instead of taps.
//!
//! ## Screen Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   Scan  |  [Home]  |  Inventory                 ◄── tab bar             │
//! │  ─────────────────────────────────────────────                          │
//! │  <active tab>                                   ◄── screen              │
//! │                                                                         │
//! │  | Label Printed                                ◄── notification        │
//! │  | Name: Milk                                       (after submit)      │
//! │                                                                         │
//! │  scan:quantity>                                 ◄── prompt              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tabs are mounted on entry: the scan tab resolves the camera permission,
//! the inventory tab re-queries the database every time.

use std::fmt::Write as _;
use std::io;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use stockscan_core::{
    CameraGate, CaptureDevice, FlowSnapshot, InventoryView, LabelField, MockQuantity, Notification,
    Notifier, QuantitySource, ScreenState, Tab, ValidationError, ZoomDirection,
};
use stockscan_db::InventorySource;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::commands::inventory::load_inventory;
use crate::commands::permission::{camera_gate, request_camera_permission};
use crate::commands::scan::{
    adjust_zoom, capture_barcode, go_back, request_label_entry, set_label_field, submit_label,
};
use crate::error::ApiError;
use crate::state::{CameraState, ScanState};

/// Command reference printed by `help`.
pub const HELP: &str = "\
Commands:
  tab <scan|home|inventory>   switch tab
  scan <type> <data> [n]      decode a barcode (n deliveries, default 1)
  zoom <in|out>               step the camera zoom by 0.1
  label                       open the label form
  set <name|price> <value>    fill a label field
  submit                      print the label
  back                        leave the current screen
  grant                       grant camera permission
  help                        show this text
  quit                        exit";

// =============================================================================
// Commands
// =============================================================================

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Tab(Tab),
    Scan {
        raw_type: String,
        data: String,
        repeat: u32,
    },
    Zoom(ZoomDirection),
    Label,
    Set(LabelField, String),
    Submit,
    Back,
    Grant,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ValidationError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();

        match verb.to_ascii_lowercase().as_str() {
            "tab" => Ok(ShellCommand::Tab(required(rest, "tab")?.parse()?)),
            "scan" => {
                let mut args = rest.split_whitespace();
                let raw_type = args.next().ok_or_else(|| missing("barcode type"))?;
                let data = args.next().ok_or_else(|| missing("barcode data"))?;
                let repeat = match args.next() {
                    None => 1,
                    Some(n) => match n.parse::<u32>() {
                        Ok(n) if n > 0 => n,
                        _ => {
                            return Err(ValidationError::InvalidFormat {
                                field: "repeat".to_string(),
                                reason: "must be a positive number".to_string(),
                            })
                        }
                    },
                };
                Ok(ShellCommand::Scan {
                    raw_type: raw_type.to_string(),
                    data: data.to_string(),
                    repeat,
                })
            }
            "zoom" => Ok(ShellCommand::Zoom(required(rest, "zoom direction")?.parse()?)),
            "label" => Ok(ShellCommand::Label),
            "set" => {
                // Everything after the single separator is the value, spaces included
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let field = required(field, "label field")?.parse()?;
                Ok(ShellCommand::Set(field, value.to_string()))
            }
            "submit" => Ok(ShellCommand::Submit),
            "back" => Ok(ShellCommand::Back),
            "grant" => Ok(ShellCommand::Grant),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            _ => Err(ValidationError::not_allowed(
                "command",
                [
                    "tab", "scan", "zoom", "label", "set", "submit", "back", "grant", "help",
                    "quit",
                ],
            )),
        }
    }
}

fn missing(field: &str) -> ValidationError {
    ValidationError::Required {
        field: field.to_string(),
    }
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(missing(field))
    } else {
        Ok(value)
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Collects notifications until the shell prints them.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    pending: Mutex<Vec<Notification>>,
}

impl ConsoleNotifier {
    /// Takes everything queued so far.
    pub fn drain(&self) -> Vec<Notification> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *pending)
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: &Notification) {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification.clone());
    }
}

// =============================================================================
// Shell
// =============================================================================

/// Whether the shell keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// The tab navigation shell.
pub struct Shell<S, Q = MockQuantity> {
    tab: Tab,
    scan: ScanState<Q>,
    camera: CameraState,
    inventory_source: S,
    inventory: InventoryView,
    notifier: ConsoleNotifier,
}

impl<S: InventorySource, Q: QuantitySource> Shell<S, Q> {
    /// Creates a shell on the home tab.
    pub fn new(inventory_source: S, scan: ScanState<Q>, camera: CameraState) -> Self {
        Shell {
            tab: Tab::default(),
            scan,
            camera,
            inventory_source,
            inventory: InventoryView::default(),
            notifier: ConsoleNotifier::default(),
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn inventory(&self) -> &InventoryView {
        &self.inventory
    }

    pub fn scan_snapshot(&self) -> FlowSnapshot {
        self.scan.snapshot()
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut frame = self.render();
        frame.push_str(&self.prompt());
        output.write_all(frame.as_bytes()).await?;
        output.flush().await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                output.write_all(self.prompt().as_bytes()).await?;
                output.flush().await?;
                continue;
            }

            let control = self.handle_line(&line, &mut output).await?;
            if control == Control::Quit {
                break;
            }

            let mut frame = self.render();
            for notification in self.notifier.drain() {
                frame.push_str(&render_notification(&notification));
            }
            frame.push_str(&self.prompt());
            output.write_all(frame.as_bytes()).await?;
            output.flush().await?;
        }

        debug!("Shell finished");
        Ok(())
    }

    /// Executes one line. Errors are written to `output`, not returned.
    pub async fn handle_line<W>(&mut self, line: &str, output: &mut W) -> io::Result<Control>
    where
        W: AsyncWrite + Unpin,
    {
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(e) => {
                let message = format!("error: {}\nType `help` for commands.\n", e);
                output.write_all(message.as_bytes()).await?;
                return Ok(Control::Continue);
            }
        };

        debug!(?command, tab = ?self.tab, "Shell command");

        match command {
            ShellCommand::Quit => return Ok(Control::Quit),
            ShellCommand::Help => {
                output.write_all(format!("{}\n", HELP).as_bytes()).await?;
            }
            ShellCommand::Tab(Tab::Inventory) => {
                self.tab = Tab::Inventory;
                self.inventory = InventoryView::Loading;
                output.write_all(self.render().as_bytes()).await?;
                self.inventory = load_inventory(&self.inventory_source).await;
            }
            ShellCommand::Tab(tab) => {
                self.tab = tab;
                if tab == Tab::Scan {
                    camera_gate(&self.camera);
                }
            }
            command => {
                if let Err(e) = self.scan_command(command) {
                    output
                        .write_all(format!("error: {}\n", e.message).as_bytes())
                        .await?;
                }
            }
        }

        Ok(Control::Continue)
    }

    /// Commands that only exist on the scan tab.
    fn scan_command(&mut self, command: ShellCommand) -> Result<(), ApiError> {
        if self.tab != Tab::Scan {
            return Err(ApiError::validation("Open the Scan tab first (`tab scan`)"));
        }

        if let ShellCommand::Grant = command {
            request_camera_permission(&self.camera);
            return Ok(());
        }

        if self.camera.with_camera(|c| c.gate()) != CameraGate::Camera {
            return Err(ApiError::permission_denied());
        }

        match command {
            ShellCommand::Scan {
                raw_type,
                data,
                repeat,
            } => {
                for delivery in 1..=repeat {
                    let response = capture_barcode(&self.scan, &self.camera, &raw_type, &data)?;
                    debug!(delivery, applied = response.is_applied(), "Barcode delivered");
                }
            }
            ShellCommand::Zoom(direction) => {
                adjust_zoom(&self.scan, &self.camera, direction);
            }
            ShellCommand::Label => {
                request_label_entry(&self.scan);
            }
            ShellCommand::Set(field, value) => {
                set_label_field(&self.scan, field, value);
            }
            ShellCommand::Submit => {
                submit_label(&self.scan, &self.camera, &self.notifier);
            }
            ShellCommand::Back => {
                go_back(&self.scan, &self.camera);
            }
            ShellCommand::Tab(_) | ShellCommand::Grant | ShellCommand::Help | ShellCommand::Quit => {}
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn prompt(&self) -> String {
        match self.tab {
            Tab::Scan => format!("scan:{}> ", self.scan.snapshot().screen.name()),
            Tab::Home => "home> ".to_string(),
            Tab::Inventory => "inventory> ".to_string(),
        }
    }

    /// Renders the tab bar and the active screen.
    pub fn render(&self) -> String {
        let mut out = String::new();

        let bar: Vec<String> = Tab::ALL
            .iter()
            .map(|tab| {
                if *tab == self.tab {
                    format!("[{}]", tab.title())
                } else {
                    format!(" {} ", tab.title())
                }
            })
            .collect();
        let _ = writeln!(out, "\n {}", bar.join(" | "));
        let _ = writeln!(out, " {}", "-".repeat(40));

        match self.tab {
            Tab::Home => render_home(&mut out),
            Tab::Inventory => out.push_str(&render_inventory(&self.inventory)),
            Tab::Scan => self.render_scan(&mut out),
        }

        out
    }

    fn render_scan(&self, out: &mut String) {
        let (gate, symbologies) = self.camera.with_camera(|c| {
            let names: Vec<&str> = c.symbologies().iter().map(|s| s.as_str()).collect();
            (c.gate(), names.join(", "))
        });

        match gate {
            CameraGate::Blank => {}
            CameraGate::PermissionRequired => {
                let _ = writeln!(out, " {}", CameraGate::PERMISSION_MESSAGE);
                let _ = writeln!(out, " [{}]  (grant)", CameraGate::GRANT_ACTION);
            }
            CameraGate::Camera => {
                let snapshot = self.scan.snapshot();
                match (snapshot.screen, &snapshot.session) {
                    (ScreenState::ReviewingQuantity, Some(session)) => {
                        let _ = writeln!(out, " Barcode:  {}", session.barcode_value);
                        let _ = writeln!(out, " Type:     {}", session.symbology);
                        let _ = writeln!(out, " Quantity: {}", session.quantity_mock);
                        let _ = writeln!(out, " [Create Label] (label)   [Back] (back)");
                    }
                    (ScreenState::EditingLabel, Some(session)) => {
                        let draft = snapshot.draft.unwrap_or_default();
                        let _ = writeln!(out, " Create Label for {}", session.barcode_value);
                        let _ = writeln!(out, " Name:  {}", draft.name);
                        let _ = writeln!(out, " Price: {}", draft.price);
                        let _ = writeln!(out, " [Submit] (submit)   [Back] (back)");
                    }
                    _ => {
                        let _ = writeln!(out, " Camera ready, point at a barcode");
                        let _ = writeln!(out, " Types: {}", symbologies);
                        let _ = writeln!(out, " Zoom:  {}   [-] [+]  (zoom out|in)", snapshot.zoom);
                    }
                }
            }
        }
    }
}

fn render_home(out: &mut String) {
    let _ = writeln!(out, " StockScan");
    let _ = writeln!(out, " Scan barcodes and print labels on the Scan tab.");
    let _ = writeln!(out, " Browse stock levels on the Inventory tab.");
}

/// Renders the inventory list.
pub fn render_inventory(view: &InventoryView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, " {}", InventoryView::TITLE);

    if view.is_loading() {
        let _ = writeln!(out, " {}", InventoryView::LOADING_MESSAGE);
        return out;
    }

    let rows = view.rows();
    if rows.is_empty() {
        let _ = writeln!(out, " {}", InventoryView::EMPTY_MESSAGE);
        return out;
    }

    for row in rows {
        let _ = writeln!(
            out,
            " {:<8} {:<24} {}",
            row.id_label, row.name, row.quantity_label
        );
    }
    out
}

fn render_notification(notification: &Notification) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n | {}", notification.title);
    for line in notification.message.lines() {
        let _ = writeln!(out, " | {}", line);
    }
    let _ = writeln!(out, " | [OK]");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SimulatedCamera;
    use std::num::NonZeroU32;
    use stockscan_core::{BarcodeSymbology, FixedQuantity, InventoryItem};
    use stockscan_db::{Database, DbConfig, DbError, DbResult, InventoryRepository};

    struct Broken;

    impl InventorySource for Broken {
        async fn load_inventory(&self) -> DbResult<Vec<InventoryItem>> {
            Err(DbError::QueryFailed("disk I/O error".into()))
        }
    }

    fn shell_with<S: InventorySource>(source: S, denied: bool) -> Shell<S, FixedQuantity> {
        Shell::new(
            source,
            ScanState::with_quantities(FixedQuantity(NonZeroU32::new(7).unwrap())),
            CameraState::new(SimulatedCamera::new(BarcodeSymbology::ALL.to_vec(), denied)),
        )
    }

    async fn seeded_repo() -> InventoryRepository {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.inventory();
        repo.insert(&InventoryItem::new(1, "Apple", 10)).await.unwrap();
        repo.insert(&InventoryItem::new(2, "Bread", 0)).await.unwrap();
        repo
    }

    async fn drive<S: InventorySource>(shell: &mut Shell<S, FixedQuantity>, script: &str) -> String {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "tab inventory".parse::<ShellCommand>().unwrap(),
            ShellCommand::Tab(Tab::Inventory)
        );
        assert_eq!(
            "scan ean13 0123456789012 3".parse::<ShellCommand>().unwrap(),
            ShellCommand::Scan {
                raw_type: "ean13".into(),
                data: "0123456789012".into(),
                repeat: 3,
            }
        );
        assert_eq!(
            "set name Whole Milk 1L".parse::<ShellCommand>().unwrap(),
            ShellCommand::Set(LabelField::Name, "Whole Milk 1L".into())
        );
        assert_eq!(
            "set name  Whole Milk 1L ".parse::<ShellCommand>().unwrap(),
            ShellCommand::Set(LabelField::Name, " Whole Milk 1L ".into())
        );
        assert_eq!(
            "set price    ".parse::<ShellCommand>().unwrap(),
            ShellCommand::Set(LabelField::Price, "   ".into())
        );
        assert_eq!(
            "set price".parse::<ShellCommand>().unwrap(),
            ShellCommand::Set(LabelField::Price, String::new())
        );
        assert_eq!(
            "zoom +".parse::<ShellCommand>().unwrap(),
            ShellCommand::Zoom(ZoomDirection::In)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("fly".parse::<ShellCommand>().is_err());
        assert!("tab".parse::<ShellCommand>().is_err());
        assert!("scan ean13".parse::<ShellCommand>().is_err());
        assert!("scan ean13 123 0".parse::<ShellCommand>().is_err());
        assert!("set colour red".parse::<ShellCommand>().is_err());
    }

    #[tokio::test]
    async fn test_starts_on_home() {
        let mut shell = shell_with(Broken, false);
        let out = drive(&mut shell, "quit\n").await;
        assert_eq!(shell.tab(), Tab::Home);
        assert!(out.contains("[Home]"));
        assert!(out.contains("home> "));
    }

    #[tokio::test]
    async fn test_inventory_tab_lists_products() {
        let mut shell = shell_with(seeded_repo().await, false);
        let out = drive(&mut shell, "tab inventory\n").await;

        assert!(out.contains(InventoryView::LOADING_MESSAGE));
        assert!(out.contains("ID: 1"));
        assert!(out.contains("Apple"));
        assert!(out.contains("Qty: 10"));
        assert!(out.contains("Bread"));
        assert!(out.contains("Qty: 0"));
        assert_eq!(shell.inventory().items().len(), 2);
    }

    #[tokio::test]
    async fn test_inventory_failure_shows_empty() {
        let mut shell = shell_with(Broken, false);
        let out = drive(&mut shell, "tab inventory\n").await;
        assert!(out.contains(InventoryView::EMPTY_MESSAGE));
        assert!(!shell.inventory().is_loading());
    }

    #[tokio::test]
    async fn test_inventory_requeried_on_mount() {
        let repo = seeded_repo().await;
        let mut shell = shell_with(repo.clone(), false);
        drive(&mut shell, "tab inventory\n").await;
        assert_eq!(shell.inventory().items().len(), 2);

        repo.insert(&InventoryItem::new(3, "Eggs", 12)).await.unwrap();
        drive(&mut shell, "tab home\ntab inventory\n").await;
        assert_eq!(shell.inventory().items().len(), 3);
    }

    #[tokio::test]
    async fn test_permission_screen_then_grant() {
        let mut shell = shell_with(Broken, false);
        let out = drive(&mut shell, "tab scan\nscan ean13 123\ngrant\n").await;

        assert!(out.contains(CameraGate::PERMISSION_MESSAGE));
        assert!(out.contains("Grant Permission"));
        assert!(out.contains("error: Camera permission not granted"));
        assert!(out.contains("Camera ready"));
        assert_eq!(shell.scan_snapshot().screen, ScreenState::Scanning);
    }

    #[tokio::test]
    async fn test_denied_permission_keeps_blocking() {
        let mut shell = shell_with(Broken, true);
        let out = drive(&mut shell, "tab scan\ngrant\n").await;
        assert!(!out.contains("Camera ready"));
        assert!(out.ends_with("scan:scan> "));
    }

    #[tokio::test]
    async fn test_scan_to_label_scenario() {
        let mut shell = shell_with(Broken, false);
        let script = "\
tab scan
grant
zoom in
scan ean13 0123456789012 3
label
set name Whole Milk
set price 2.49
submit
";
        let out = drive(&mut shell, script).await;

        assert!(out.contains("Quantity: 7"));
        assert!(out.contains("Create Label for 0123456789012"));
        assert!(out.contains("Name:  Whole Milk"));
        assert!(out.contains(" | Label Printed"));
        assert!(out.contains(" | Name: Whole Milk"));
        assert!(out.contains(" | Price: 2.49"));
        assert!(out.contains(" | Barcode: 0123456789012"));

        let snapshot = shell.scan_snapshot();
        assert_eq!(snapshot.screen, ScreenState::Scanning);
        assert!(snapshot.session.is_none());
        assert!(!snapshot.scanned);
        assert_eq!(snapshot.zoom.to_string(), "0.1");
    }

    #[tokio::test]
    async fn test_scan_commands_need_scan_tab() {
        let mut shell = shell_with(Broken, false);
        let out = drive(&mut shell, "label\n").await;
        assert!(out.contains("Open the Scan tab first"));
    }

    #[tokio::test]
    async fn test_flow_survives_tab_switch() {
        let mut shell = shell_with(Broken, false);
        drive(&mut shell, "tab scan\ngrant\nscan qr hello\ntab home\ntab scan\n").await;
        let snapshot = shell.scan_snapshot();
        assert_eq!(snapshot.screen, ScreenState::ReviewingQuantity);
        assert_eq!(snapshot.session.unwrap().barcode_value, "hello");
    }

    #[tokio::test]
    async fn test_unknown_command_prints_hint() {
        let mut shell = shell_with(Broken, false);
        let out = drive(&mut shell, "dance\nhelp\n").await;
        assert!(out.contains("Type `help` for commands."));
        assert!(out.contains("zoom <in|out>"));
    }

    #[test]
    fn test_render_inventory_states() {
        assert!(render_inventory(&InventoryView::Loading).contains("Loading inventory..."));
        assert!(render_inventory(&InventoryView::Loaded(vec![])).contains("No products found"));
    }
}
