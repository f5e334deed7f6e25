//! Dvorak layout for the Moonlander.

use crate::keycode::Key::{self, *};
use crate::keycode::{KeyCode, Modifier};
use crate::models::Layer;

use super::LayerTable;

/// Control when held, escape when tapped.
pub const A_CTL: KeyCode = KeyCode::ModTap {
    hold: Modifier::LeftCtrl,
    tap: Key::Escape,
};

/// Media layer when held, minus when tapped.
pub const A_MED: KeyCode = KeyCode::LayerTap {
    layer: Layer::Media,
    tap: Key::Minus,
};

/// Control+space, the input-method switch shortcut.
pub const A_LANG: KeyCode = KeyCode::Chord {
    modifier: Modifier::LeftCtrl,
    key: Key::Space,
};

const _______: KeyCode = KeyCode::Transparent;
const XXXXXXX: KeyCode = KeyCode::NoKey;

const fn k(key: Key) -> KeyCode {
    KeyCode::Key(key)
}

/// Key tables for every layer, indexed by [`Layer::index`].
#[rustfmt::skip]
pub const KEYMAPS: [LayerTable; Layer::COUNT] = [
    /* Base layer
     *
     * ,---------------------------------------------------.         ,---------------------------------------------------.
     * |   =    |   1  |   2   |   3  |   4  |   5  |      |         |      |   6  |   7   |   8  |   9  |   0  |   `    |
     * |--------+------+-------+------+------+-------------|         |------+------+-------+------+------+------+--------|
     * | Tab    |   '  |   ,   |   .  |   P  |   Y  |  [   |         |  ]   |   F  |   G   |   C  |   R  |   L  |   \    |
     * |--------+------+-------+------+------+------|------|         |------|------+-------+------+------+------+--------|
     * |Ctrl/Esc|   A  |   O   |   E  |   U  |   I  |  (   |         |  )   |   D  |   H   |   T  |   N  |   S  | -/MEDIA|
     * |--------+------+-------+------+------+------|------'         `------|------+-------+------+------+------+--------|
     * | LShift |   ;  |   Q   |   J  |   K  |   X  |                       |   B  |   M   |   W  |   V  |   Z  |   /    |
     * |--------+------+-------+------+------+------'                       `------+-------+------+------+------+--------'
     * |        |      |       | Alt  | LGui |                                     |CtlSPC |      |      |      |        |
     * `-------------------------------------'                                     `-------------------------------------'
     *                                        ,-------------.       ,-------------.
     *                                 ,------|-------------|       |-------------+------.
     *                                 | Back | Del  |      |       |      | Enter|Space |
     *                                 `--------------------'       `--------------------'
     */
    layout!(
        k(Equal),       k(N1),          k(N2),      k(N3),      k(N4),      k(N5),      XXXXXXX,            XXXXXXX,            k(N6),          k(N7),      k(N8),      k(N9),      k(N0),      k(Grave),
        k(Tab),         k(Quote),       k(Comma),   k(Dot),     k(P),       k(Y),       k(LeftBracket),     k(RightBracket),    k(F),           k(G),       k(C),       k(R),       k(L),       k(Backslash),
        A_CTL,          k(A),           k(O),       k(E),       k(U),       k(I),       k(LeftParen),       k(RightParen),      k(D),           k(H),       k(T),       k(N),       k(S),       A_MED,
        k(LeftShift),   k(Semicolon),   k(Q),       k(J),       k(K),       k(X),                                               k(B),           k(M),       k(W),       k(V),       k(Z),       k(Slash),
        XXXXXXX,        XXXXXXX,        XXXXXXX,    k(LeftAlt), k(LeftGui),             XXXXXXX,            XXXXXXX,                            A_LANG,     XXXXXXX,    XXXXXXX,    XXXXXXX,    XXXXXXX,
                                                                k(Backspace), k(Delete), XXXXXXX,            XXXXXXX,            k(Enter),       k(Space)
    ),

    /* Media layer
     *
     * ,-----------------------------------------------------.         ,----------------------------------------------------.
     * |      |  F1  |  F2   |  F3  |  F4  |  F5  |          |         |          |  F6  |  F7   |  F8  |  F9  |  F10 | F11 |
     * |------+------+-------+------+------+-----------------|         |----------+------+-------+------+------+------+-----|
     * |      |      | Home  |  Up  | PgUp |      | WWW Back |         | WWW Fwd  |ScrlUp|       | MsUp |      |      |     |
     * |------+------+-------+------+------+------|----------|         |----------|------+-------+------+------+------+-----|
     * |      |      | Left  | Down | Right|      |WWW Search|         | WWW Home |ScrlDn| MsLeft| MsDn |MsRght|      |     |
     * |------+------+-------+------+------+------|----------'         `----------|------+-------+------+------+------+-----|
     * |      |      |  End  | Down | PgDn |      |                               |      |       |      |      |      |     |
     * |------+------+-------+------+------+------'                               `------+-------+------+------+------+-----|
     * |      |      |       |      |      |                                             |       |      |      |      |     |
     * `-----------------------------------'                                             `----------------------------------'
     *                                          ,-------------.       ,-------------.
     *                                          |   VolUp     |       |    Next     |
     *                                   ,------|-------------|       |-------------+------.
     *                                   | Play/| Stop | VolDn|       | Prev | Mouse| Mouse|
     *                                   | Pause|      |      |       |      | Left | Right|
     *                                   `--------------------'       `--------------------'
     */
    layout!(
        _______,        k(F1),          k(F2),      k(F3),      k(F4),      k(F5),      _______,            _______,            k(F6),          k(F7),          k(F8),          k(F9),          k(F10),     k(F11),
        _______,        _______,        k(Home),    k(Up),      k(PageUp),  _______,    k(WwwBack),         k(WwwForward),      k(WheelUp),     _______,        k(MouseUp),     _______,        _______,    _______,
        _______,        _______,        k(Left),    k(Down),    k(Right),   _______,    k(WwwSearch),       k(WwwHome),         k(WheelDown),   k(MouseLeft),   k(MouseDown),   k(MouseRight),  _______,    _______,
        _______,        _______,        k(End),     k(Down),    k(PageDown), _______,                                           _______,        _______,        _______,        _______,        _______,    _______,
        _______,        _______,        _______,    _______,    _______,                k(VolumeUp),        k(MediaNext),                       _______,        _______,        _______,        _______,    _______,
                                                                k(MediaPlayPause), k(MediaStop), k(VolumeDown),  k(MediaPrev),     k(MouseButton1), k(MouseButton2)
    ),
];
