//! Basic keys and their QMK names.

use serde::{Serialize, Serializer};
use std::fmt;

/// Category of keys for organization in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCategory {
    /// Letters
    Alpha,
    /// Number row digits
    Number,
    /// Unshifted punctuation
    Symbol,
    /// Symbols that send an implicit shift
    Shifted,
    /// Modifier keys
    Modifier,
    /// Enter, escape, backspace and friends
    Editing,
    /// Arrows and paging
    Navigation,
    /// F-keys
    Function,
    /// Consumer audio and transport controls
    Media,
    /// Consumer browser controls
    Browser,
    /// Mouse keys
    Mouse,
}

impl KeyCategory {
    /// All categories in listing order.
    pub const ALL: [Self; 11] = [
        Self::Alpha,
        Self::Number,
        Self::Symbol,
        Self::Shifted,
        Self::Modifier,
        Self::Editing,
        Self::Navigation,
        Self::Function,
        Self::Media,
        Self::Browser,
        Self::Mouse,
    ];

    /// Category ID (e.g., "alpha", "navigation").
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::Number => "number",
            Self::Symbol => "symbol",
            Self::Shifted => "shifted",
            Self::Modifier => "modifier",
            Self::Editing => "editing",
            Self::Navigation => "navigation",
            Self::Function => "function",
            Self::Media => "media",
            Self::Browser => "browser",
            Self::Mouse => "mouse",
        }
    }

    /// Display name (e.g., "Letters", "Navigation").
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alpha => "Letters",
            Self::Number => "Numbers",
            Self::Symbol => "Symbols",
            Self::Shifted => "Shifted Symbols",
            Self::Modifier => "Modifiers",
            Self::Editing => "Editing",
            Self::Navigation => "Navigation",
            Self::Function => "Function Keys",
            Self::Media => "Media",
            Self::Browser => "Browser",
            Self::Mouse => "Mouse",
        }
    }

    /// Looks up a category by ID.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

macro_rules! define_keys {
    (
        $(
            $variant:ident => $code:literal, $label:literal, $category:ident,
                [$($alias:literal),*], $desc:literal;
        )*
    ) => {
        /// A basic key: one HID usage, consumer control or mouse key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Key {
            $(
                #[doc = $desc]
                $variant,
            )*
        }

        impl Key {
            /// Every key in catalogue order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Canonical QMK keycode name (e.g., "KC_ESC").
            #[must_use]
            pub const fn qmk_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $code,)*
                }
            }

            /// Short label for key diagrams.
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)*
                }
            }

            /// Category the key is listed under.
            #[must_use]
            pub const fn category(self) -> KeyCategory {
                match self {
                    $(Self::$variant => KeyCategory::$category,)*
                }
            }

            /// Other QMK names that refer to the same key.
            #[must_use]
            pub const fn aliases(self) -> &'static [&'static str] {
                match self {
                    $(Self::$variant => &[$($alias),*],)*
                }
            }

            /// One-line description.
            #[must_use]
            pub const fn description(self) -> &'static str {
                match self {
                    $(Self::$variant => $desc,)*
                }
            }
        }
    };
}

define_keys! {
    A => "KC_A", "A", Alpha, [], "Letter A";
    B => "KC_B", "B", Alpha, [], "Letter B";
    C => "KC_C", "C", Alpha, [], "Letter C";
    D => "KC_D", "D", Alpha, [], "Letter D";
    E => "KC_E", "E", Alpha, [], "Letter E";
    F => "KC_F", "F", Alpha, [], "Letter F";
    G => "KC_G", "G", Alpha, [], "Letter G";
    H => "KC_H", "H", Alpha, [], "Letter H";
    I => "KC_I", "I", Alpha, [], "Letter I";
    J => "KC_J", "J", Alpha, [], "Letter J";
    K => "KC_K", "K", Alpha, [], "Letter K";
    L => "KC_L", "L", Alpha, [], "Letter L";
    M => "KC_M", "M", Alpha, [], "Letter M";
    N => "KC_N", "N", Alpha, [], "Letter N";
    O => "KC_O", "O", Alpha, [], "Letter O";
    P => "KC_P", "P", Alpha, [], "Letter P";
    Q => "KC_Q", "Q", Alpha, [], "Letter Q";
    R => "KC_R", "R", Alpha, [], "Letter R";
    S => "KC_S", "S", Alpha, [], "Letter S";
    T => "KC_T", "T", Alpha, [], "Letter T";
    U => "KC_U", "U", Alpha, [], "Letter U";
    V => "KC_V", "V", Alpha, [], "Letter V";
    W => "KC_W", "W", Alpha, [], "Letter W";
    X => "KC_X", "X", Alpha, [], "Letter X";
    Y => "KC_Y", "Y", Alpha, [], "Letter Y";
    Z => "KC_Z", "Z", Alpha, [], "Letter Z";

    N1 => "KC_1", "1", Number, [], "Digit 1 and !";
    N2 => "KC_2", "2", Number, [], "Digit 2 and @";
    N3 => "KC_3", "3", Number, [], "Digit 3 and #";
    N4 => "KC_4", "4", Number, [], "Digit 4 and $";
    N5 => "KC_5", "5", Number, [], "Digit 5 and %";
    N6 => "KC_6", "6", Number, [], "Digit 6 and ^";
    N7 => "KC_7", "7", Number, [], "Digit 7 and &";
    N8 => "KC_8", "8", Number, [], "Digit 8 and *";
    N9 => "KC_9", "9", Number, [], "Digit 9 and (";
    N0 => "KC_0", "0", Number, [], "Digit 0 and )";

    Minus => "KC_MINS", "-", Symbol, ["KC_MINUS"], "Minus and underscore";
    Equal => "KC_EQL", "=", Symbol, ["KC_EQUAL"], "Equals and plus";
    LeftBracket => "KC_LBRC", "[", Symbol, ["KC_LEFT_BRACKET"], "Left bracket and left brace";
    RightBracket => "KC_RBRC", "]", Symbol, ["KC_RIGHT_BRACKET"], "Right bracket and right brace";
    Backslash => "KC_BSLS", "\\", Symbol, ["KC_BACKSLASH"], "Backslash and pipe";
    Semicolon => "KC_SCLN", ";", Symbol, ["KC_SEMICOLON"], "Semicolon and colon";
    Quote => "KC_QUOT", "'", Symbol, ["KC_QUOTE"], "Single and double quote";
    Grave => "KC_GRV", "`", Symbol, ["KC_GRAVE"], "Grave accent and tilde";
    Comma => "KC_COMM", ",", Symbol, ["KC_COMMA"], "Comma and less-than";
    Dot => "KC_DOT", ".", Symbol, [], "Period and greater-than";
    Slash => "KC_SLSH", "/", Symbol, ["KC_SLASH"], "Slash and question mark";

    LeftParen => "KC_LPRN", "(", Shifted, ["KC_LEFT_PAREN"], "Left parenthesis (shift + 9)";
    RightParen => "KC_RPRN", ")", Shifted, ["KC_RIGHT_PAREN"], "Right parenthesis (shift + 0)";
    LeftCurly => "KC_LCBR", "{", Shifted, ["KC_LEFT_CURLY_BRACE"], "Left brace (shift + [)";
    RightCurly => "KC_RCBR", "}", Shifted, ["KC_RIGHT_CURLY_BRACE"], "Right brace (shift + ])";
    Underscore => "KC_UNDS", "_", Shifted, ["KC_UNDERSCORE"], "Underscore (shift + -)";
    Plus => "KC_PLUS", "+", Shifted, [], "Plus (shift + =)";

    LeftCtrl => "KC_LCTL", "Ctl", Modifier, ["KC_LEFT_CTRL"], "Left Control";
    LeftShift => "KC_LSFT", "Sft", Modifier, ["KC_LEFT_SHIFT"], "Left Shift";
    LeftAlt => "KC_LALT", "Alt", Modifier, ["KC_LEFT_ALT", "KC_LOPT"], "Left Alt";
    LeftGui => "KC_LGUI", "Gui", Modifier, ["KC_LEFT_GUI", "KC_LCMD", "KC_LWIN"], "Left GUI";
    RightCtrl => "KC_RCTL", "RCtl", Modifier, ["KC_RIGHT_CTRL"], "Right Control";
    RightShift => "KC_RSFT", "RSft", Modifier, ["KC_RIGHT_SHIFT"], "Right Shift";
    RightAlt => "KC_RALT", "RAlt", Modifier, ["KC_RIGHT_ALT", "KC_ROPT", "KC_ALGR"], "Right Alt";
    RightGui => "KC_RGUI", "RGui", Modifier, ["KC_RIGHT_GUI", "KC_RCMD", "KC_RWIN"], "Right GUI";

    Enter => "KC_ENT", "Enter", Editing, ["KC_ENTER"], "Return";
    Escape => "KC_ESC", "Esc", Editing, ["KC_ESCAPE"], "Escape";
    Backspace => "KC_BSPC", "Bksp", Editing, ["KC_BACKSPACE"], "Backspace";
    Tab => "KC_TAB", "Tab", Editing, [], "Tab";
    Space => "KC_SPC", "Spc", Editing, ["KC_SPACE"], "Spacebar";
    Delete => "KC_DEL", "Del", Editing, ["KC_DELETE"], "Forward delete";
    Insert => "KC_INS", "Ins", Editing, ["KC_INSERT"], "Insert";
    CapsLock => "KC_CAPS", "Caps", Editing, ["KC_CAPS_LOCK"], "Caps Lock";
    PrintScreen => "KC_PSCR", "PrtSc", Editing, ["KC_PRINT_SCREEN"], "Print Screen";

    Home => "KC_HOME", "Home", Navigation, [], "Home";
    End => "KC_END", "End", Navigation, [], "End";
    PageUp => "KC_PGUP", "PgUp", Navigation, ["KC_PAGE_UP"], "Page Up";
    PageDown => "KC_PGDN", "PgDn", Navigation, ["KC_PAGE_DOWN"], "Page Down";
    Left => "KC_LEFT", "Left", Navigation, [], "Left arrow";
    Right => "KC_RIGHT", "Right", Navigation, ["KC_RGHT"], "Right arrow";
    Up => "KC_UP", "Up", Navigation, [], "Up arrow";
    Down => "KC_DOWN", "Down", Navigation, [], "Down arrow";

    F1 => "KC_F1", "F1", Function, [], "F1";
    F2 => "KC_F2", "F2", Function, [], "F2";
    F3 => "KC_F3", "F3", Function, [], "F3";
    F4 => "KC_F4", "F4", Function, [], "F4";
    F5 => "KC_F5", "F5", Function, [], "F5";
    F6 => "KC_F6", "F6", Function, [], "F6";
    F7 => "KC_F7", "F7", Function, [], "F7";
    F8 => "KC_F8", "F8", Function, [], "F8";
    F9 => "KC_F9", "F9", Function, [], "F9";
    F10 => "KC_F10", "F10", Function, [], "F10";
    F11 => "KC_F11", "F11", Function, [], "F11";
    F12 => "KC_F12", "F12", Function, [], "F12";

    Mute => "KC_MUTE", "Mute", Media, ["KC_AUDIO_MUTE"], "Mute audio";
    VolumeUp => "KC_VOLU", "VolUp", Media, ["KC_AUDIO_VOL_UP"], "Volume up";
    VolumeDown => "KC_VOLD", "VolDn", Media, ["KC_AUDIO_VOL_DOWN"], "Volume down";
    MediaNext => "KC_MNXT", "Next", Media, ["KC_MEDIA_NEXT_TRACK"], "Next track";
    MediaPrev => "KC_MPRV", "Prev", Media, ["KC_MEDIA_PREV_TRACK"], "Previous track";
    MediaStop => "KC_MSTP", "Stop", Media, ["KC_MEDIA_STOP"], "Stop playback";
    MediaPlayPause => "KC_MPLY", "Play", Media, ["KC_MEDIA_PLAY_PAUSE"], "Play or pause";

    WwwSearch => "KC_WSCH", "WSrch", Browser, ["KC_WWW_SEARCH"], "Browser search";
    WwwHome => "KC_WHOM", "WHome", Browser, ["KC_WWW_HOME"], "Browser home";
    WwwBack => "KC_WBAK", "WBack", Browser, ["KC_WWW_BACK"], "Browser back";
    WwwForward => "KC_WFWD", "WFwd", Browser, ["KC_WWW_FORWARD"], "Browser forward";
    WwwStop => "KC_WSTP", "WStop", Browser, ["KC_WWW_STOP"], "Browser stop";
    WwwRefresh => "KC_WREF", "WRef", Browser, ["KC_WWW_REFRESH"], "Browser refresh";

    MouseUp => "KC_MS_UP", "MsUp", Mouse, ["MS_UP"], "Move mouse cursor up";
    MouseDown => "KC_MS_DOWN", "MsDn", Mouse, ["MS_DOWN"], "Move mouse cursor down";
    MouseLeft => "KC_MS_LEFT", "MsLft", Mouse, ["MS_LEFT"], "Move mouse cursor left";
    MouseRight => "KC_MS_RIGHT", "MsRgt", Mouse, ["MS_RGHT"], "Move mouse cursor right";
    MouseButton1 => "KC_MS_BTN1", "Btn1", Mouse, ["MS_BTN1", "KC_BTN1"], "Left mouse button";
    MouseButton2 => "KC_MS_BTN2", "Btn2", Mouse, ["MS_BTN2", "KC_BTN2"], "Right mouse button";
    MouseButton3 => "KC_MS_BTN3", "Btn3", Mouse, ["MS_BTN3", "KC_BTN3"], "Middle mouse button";
    WheelUp => "KC_MS_WH_UP", "WhUp", Mouse, ["MS_WHLU", "KC_WH_U"], "Scroll wheel up";
    WheelDown => "KC_MS_WH_DOWN", "WhDn", Mouse, ["MS_WHLD", "KC_WH_D"], "Scroll wheel down";
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.qmk_name())
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
