//! Desktop simulator for the picker-rs modal picker UI.
//!
//! Renders a [`Screen`] in an SDL2 window via `embedded-graphics-simulator`.
//! The base screen has two buttons: one opens a color picker, the other a
//! tool palette that stays open and opens a nested size picker.
//!
//! # Key bindings
//!
//! | Key               | Action                 |
//! |-------------------|------------------------|
//! | Arrow keys        | Move focus             |
//! | Z / Enter         | Select focused button  |
//! | X / Backspace     | Close topmost picker   |
//! | Q / Escape        | Quit                   |

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use picker_rs::config::{encode_palette, load_palette};
use picker_rs::ui::styling::colors::{BLUE, WHITE, indexed};
use picker_rs::ui::{Action, Button, ButtonSpec, ButtonStyle, NavigatorKind};
use picker_rs::{
    GroupDef, Input, InputResult, ModalResult, PickerButtonDef, PickerId, Screen, ShowOptions,
    UiConfig,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 4;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// Demo state
// ---------------------------------------------------------------------------

/// What the user has picked so far.
#[derive(Debug, Default)]
struct Selection {
    color: Option<String>,
    tool: Option<String>,
    size: Option<String>,
}

type Shared = Rc<RefCell<Selection>>;

struct Pickers {
    colors: PickerId,
    tools: PickerId,
    sizes: PickerId,
}

/// Color palette, read back from its postcard encoding the way a palette
/// stored in flash would be.
fn color_palette() -> Vec<GroupDef> {
    let groups = vec![
        GroupDef::from_icons(&[
            "red", "orange", "yellow", "green", "teal", "blue", "purple",
        ]),
        GroupDef::new()
            .with_button(
                PickerButtonDef::new("white")
                    .with_label("White")
                    .with_style(ButtonStyle::BorderedPurple),
            )
            .with_button(
                PickerButtonDef::new("black")
                    .with_label("Black")
                    .with_style(ButtonStyle::BorderedPurple),
            ),
    ];
    match encode_palette(&groups).and_then(|bytes| load_palette(&bytes)) {
        Ok(loaded) => loaded,
        Err(e) => {
            warn!("Palette round trip failed: {}", e);
            groups
        }
    }
}

fn show_colors(screen: &mut Screen, pickers: &Pickers, selection: &Shared) -> ModalResult<()> {
    for group in color_palette() {
        screen.add_group(pickers.colors, group)?;
    }
    let picked = selection.clone();
    let deleted = selection.clone();
    let opts = ShowOptions::new()
        .with_title("Color")
        .on_click(move |_, icon, _| {
            info!("Color picked: {}", icon);
            picked.borrow_mut().color = Some(icon.to_string());
        })
        .on_hide(|_| info!("Color picker closed"))
        .on_delete(move |_| {
            info!("Color cleared");
            deleted.borrow_mut().color = None;
        });
    screen.show(pickers.colors, opts, true)
}

/// The tool palette stays open after a click, so picking the brush can open
/// the size picker on top of it.
fn show_tools(screen: &mut Screen, pickers: &Pickers, selection: &Shared) -> ModalResult<()> {
    screen.add_group(
        pickers.tools,
        GroupDef::from_icons(&["brush", "eraser", "fill"]),
    )?;
    let sizes = pickers.sizes;
    let tool = selection.clone();
    let opts = ShowOptions::new()
        .with_title("Tools")
        .on_click(move |screen, icon, _| {
            info!("Tool picked: {}", icon);
            tool.borrow_mut().tool = Some(icon.to_string());
            if icon == "brush"
                && let Err(e) = show_sizes(screen, sizes, &tool)
            {
                error!("Size picker failed: {}", e);
            }
        })
        .on_hide(|_| info!("Tool palette closed"));
    screen.show(pickers.tools, opts, false)
}

fn show_sizes(screen: &mut Screen, sizes: PickerId, selection: &Shared) -> ModalResult<()> {
    let group = ["1", "2", "4", "8"]
        .iter()
        .fold(GroupDef::new(), |group, size| {
            group.with_button(
                PickerButtonDef::new(size)
                    .with_style(ButtonStyle::Flat)
                    .with_size(10, 10),
            )
        });
    screen.add_group(sizes, group)?;
    let size = selection.clone();
    let opts = ShowOptions::new()
        .with_navigator(NavigatorKind::Linear)
        .on_click(move |_, icon, _| {
            info!("Brush size picked: {}", icon);
            size.borrow_mut().size = Some(icon.to_string());
        });
    screen.show(sizes, opts, true)
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Map an SDL keycode to a screen input.
fn keycode_to_input(keycode: Keycode) -> Option<Input> {
    match keycode {
        Keycode::Up => Some(Input::Up),
        Keycode::Down => Some(Input::Down),
        Keycode::Left => Some(Input::Left),
        Keycode::Right => Some(Input::Right),
        Keycode::Z | Keycode::Return => Some(Input::Select),
        Keycode::X | Keycode::Backspace => Some(Input::Cancel),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw_status<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    selection: &Selection,
) -> Result<(), D::Error> {
    let style = MonoTextStyle::new(&FONT_6X10, indexed(WHITE));
    let lines = [
        format!("color {}", selection.color.as_deref().unwrap_or("-")),
        format!("tool  {}", selection.tool.as_deref().unwrap_or("-")),
        format!("size  {}", selection.size.as_deref().unwrap_or("-")),
    ];
    for (row, line) in lines.iter().enumerate() {
        Text::with_baseline(
            line,
            Point::new(2, 2 + row as i32 * 10),
            style,
            Baseline::Top,
        )
        .draw(display)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting picker-rs simulator");

    let config = UiConfig::default();
    info!(
        "Display: {}×{} (scale {}×)",
        config.display_width, config.display_height, WINDOW_SCALE
    );
    info!("Keys: arrows=Move  Z/Enter=Select  X/Backspace=Cancel  Q=Quit");

    let mut screen = Screen::new(config);
    let pickers = match (
        screen.create_picker(),
        screen.create_picker(),
        screen.create_picker(),
    ) {
        (Ok(colors), Ok(tools), Ok(sizes)) => Pickers {
            colors,
            tools,
            sizes,
        },
        _ => {
            error!("Failed to create pickers");
            return;
        }
    };

    let base: Vec<Button> = [("paint", "Colors", -30), ("tools", "Tools", 30)]
        .into_iter()
        .enumerate()
        .filter_map(|(idx, (icon, label, x))| {
            let spec = ButtonSpec::new(icon, Action::Custom(idx as u16))
                .with_style(ButtonStyle::BorderedPurple)
                .with_label(label)
                .at(Point::new(x, 20));
            screen.create_button(spec).ok()
        })
        .collect();
    let focusables: Vec<_> = base.iter().filter_map(Button::focusable).collect();
    screen.register_focusables(&focusables);

    let selection = Shared::default();

    // SDL2 display and window
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(
        config.display_width,
        config.display_height,
    ));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Picker Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    let _ = display.clear(indexed(BLUE));
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let keycode = match event {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, .. } => keycode,
                _ => continue,
            };
            if keycode == Keycode::Q || keycode == Keycode::Escape {
                break 'running;
            }
            let Some(input) = keycode_to_input(keycode) else {
                continue;
            };

            let result = screen.handle_input(input).and_then(|result| match result {
                InputResult::Selected(widget) => {
                    match base.iter().find(|b| b.id() == widget).and_then(Button::click) {
                        Some(Action::Custom(0)) => show_colors(&mut screen, &pickers, &selection),
                        Some(Action::Custom(1)) => show_tools(&mut screen, &pickers, &selection),
                        _ => Ok(()),
                    }
                }
                _ => Ok(()),
            });
            if let Err(e) = result {
                error!("Input {:?} failed: {}", input, e);
            }
        }

        // --- Render -------------------------------------------------------
        let _ = display.clear(indexed(BLUE));
        if let Err(e) = draw_status(&mut display, &selection.borrow()) {
            error!("Draw error: {:?}", e);
        }
        for button in &base {
            let _ = button.draw(screen.xfrms(), &mut display);
        }
        if let Err(e) = screen.draw(&mut display) {
            error!("Draw error: {:?}", e);
        }
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    info!("Simulator exiting");
}
