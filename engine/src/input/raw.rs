//! Raw Input Packets
//!
//! Decodes the packets delivered by an OS raw-input facility into keyboard and
//! mouse events. The byte layout follows the 64-bit Windows `RAWINPUT`
//! structure: a 24-byte header followed by a keyboard or mouse payload.
//!
//! Packets are fetched through a [`RawInputSource`] with the usual two-step
//! pattern (query the size, then read into a caller buffer). The
//! [`RawInputReader`] reads into a fixed scratch buffer and only touches the
//! heap for oversized packets.

use bytemuck::{Pod, Zeroable};
use log::trace;

use super::keys::{KeyCode, MouseButton};
use crate::error::RawInputError;

/// Header `kind` of a mouse packet.
pub const RIM_TYPEMOUSE: u32 = 0;
/// Header `kind` of a keyboard packet.
pub const RIM_TYPEKEYBOARD: u32 = 1;

/// Keyboard `flags` bit marking a key-up.
pub const RI_KEY_BREAK: u16 = 0x0001;

/// Mouse `flags` value for relative motion.
pub const MOUSE_MOVE_RELATIVE: u16 = 0x0000;

pub const RI_MOUSE_LEFT_BUTTON_DOWN: u16 = 0x0001;
pub const RI_MOUSE_LEFT_BUTTON_UP: u16 = 0x0002;
pub const RI_MOUSE_RIGHT_BUTTON_DOWN: u16 = 0x0004;
pub const RI_MOUSE_RIGHT_BUTTON_UP: u16 = 0x0008;
pub const RI_MOUSE_MIDDLE_BUTTON_DOWN: u16 = 0x0010;
pub const RI_MOUSE_MIDDLE_BUTTON_UP: u16 = 0x0020;
pub const RI_MOUSE_BUTTON_4_DOWN: u16 = 0x0040;
pub const RI_MOUSE_BUTTON_4_UP: u16 = 0x0080;
pub const RI_MOUSE_BUTTON_5_DOWN: u16 = 0x0100;
pub const RI_MOUSE_BUTTON_5_UP: u16 = 0x0200;
pub const RI_MOUSE_WHEEL: u16 = 0x0400;
pub const RI_MOUSE_HWHEEL: u16 = 0x0800;

/// One wheel notch.
pub const WHEEL_DELTA: i32 = 120;

/// Size of the reader's scratch buffer. Larger packets go to the heap.
pub const SCRATCH_SIZE: usize = 2048;

static BUTTON_FLAGS: [(MouseButton, u16, u16); 5] = [
    (MouseButton::Left, RI_MOUSE_LEFT_BUTTON_DOWN, RI_MOUSE_LEFT_BUTTON_UP),
    (MouseButton::Right, RI_MOUSE_RIGHT_BUTTON_DOWN, RI_MOUSE_RIGHT_BUTTON_UP),
    (MouseButton::Middle, RI_MOUSE_MIDDLE_BUTTON_DOWN, RI_MOUSE_MIDDLE_BUTTON_UP),
    (MouseButton::X1, RI_MOUSE_BUTTON_4_DOWN, RI_MOUSE_BUTTON_4_UP),
    (MouseButton::X2, RI_MOUSE_BUTTON_5_DOWN, RI_MOUSE_BUTTON_5_UP),
];

/// Packet header (24 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct RawInputHeader {
    /// `RIM_TYPEMOUSE` or `RIM_TYPEKEYBOARD`.
    pub kind: u32,
    /// Total packet size in bytes, header included.
    pub size: u32,
    pub device: u64,
    pub wparam: u64,
}

/// Keyboard payload (16 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct RawKeyboard {
    pub make_code: u16,
    pub flags: u16,
    pub reserved: u16,
    pub vkey: u16,
    pub message: u32,
    pub extra_information: u32,
}

/// Mouse payload (24 bytes).
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct RawMouse {
    pub flags: u16,
    pub _pad: u16,
    pub button_flags: u16,
    pub button_data: u16,
    pub raw_buttons: u32,
    pub last_x: i32,
    pub last_y: i32,
    pub extra_information: u32,
}

static_assertions::assert_eq_size!(RawInputHeader, [u8; 24]);
static_assertions::assert_eq_size!(RawKeyboard, [u8; 16]);
static_assertions::assert_eq_size!(RawMouse, [u8; 24]);

const HEADER_SIZE: usize = std::mem::size_of::<RawInputHeader>();

impl RawKeyboard {
    /// A make/break payload for `vkey`.
    pub fn new(vkey: u16, is_break: bool) -> Self {
        Self {
            flags: if is_break { RI_KEY_BREAK } else { 0 },
            vkey,
            ..Self::zeroed()
        }
    }

    /// Full packet bytes (header and payload).
    pub fn to_packet(&self) -> Vec<u8> {
        packet_bytes(RIM_TYPEKEYBOARD, bytemuck::bytes_of(self))
    }

    pub fn is_break(&self) -> bool {
        self.flags & RI_KEY_BREAK != 0
    }

    /// The key this payload refers to, if it is one we track.
    pub fn key(&self) -> Option<KeyCode> {
        KeyCode::from_code(self.vkey)
    }
}

impl RawMouse {
    /// Relative motion payload.
    pub fn motion(dx: i32, dy: i32) -> Self {
        Self {
            flags: MOUSE_MOVE_RELATIVE,
            last_x: dx,
            last_y: dy,
            ..Self::zeroed()
        }
    }

    /// Button transition payload carrying `button_flags`.
    pub fn buttons(button_flags: u16) -> Self {
        Self {
            button_flags,
            ..Self::zeroed()
        }
    }

    /// Vertical wheel payload, `delta` in `WHEEL_DELTA` units.
    pub fn wheel(delta: i16) -> Self {
        Self {
            button_flags: RI_MOUSE_WHEEL,
            button_data: delta as u16,
            ..Self::zeroed()
        }
    }

    pub fn to_packet(&self) -> Vec<u8> {
        packet_bytes(RIM_TYPEMOUSE, bytemuck::bytes_of(self))
    }

    /// Relative motion, or `None` for absolute-positioning devices.
    pub fn relative_motion(&self) -> Option<(i32, i32)> {
        (self.flags == MOUSE_MOVE_RELATIVE).then_some((self.last_x, self.last_y))
    }

    /// Button transitions in this payload as `(button, is_down)`.
    ///
    /// A down and an up for the same button in one payload are both
    /// reported, down first.
    pub fn button_transitions(&self) -> impl Iterator<Item = (MouseButton, bool)> + '_ {
        BUTTON_FLAGS.iter().flat_map(move |&(button, down, up)| {
            let pressed = (self.button_flags & down != 0).then_some((button, true));
            let released = (self.button_flags & up != 0).then_some((button, false));
            pressed.into_iter().chain(released)
        })
    }

    /// Signed vertical wheel delta, if the payload carries one.
    pub fn wheel_delta(&self) -> Option<i32> {
        (self.button_flags & RI_MOUSE_WHEEL != 0).then_some(self.button_data as i16 as i32)
    }
}

fn packet_bytes(kind: u32, payload: &[u8]) -> Vec<u8> {
    let header = RawInputHeader {
        kind,
        size: (HEADER_SIZE + payload.len()) as u32,
        device: 0,
        wparam: 0,
    };
    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(bytemuck::bytes_of(&header));
    bytes.extend_from_slice(payload);
    bytes
}

/// A decoded raw input packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawPacket {
    Keyboard(RawKeyboard),
    Mouse(RawMouse),
}

impl RawPacket {
    /// Decode a packet from its bytes. Trailing bytes after the payload are
    /// ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self, RawInputError> {
        let header: RawInputHeader = read_pod(bytes, 0)?;
        match header.kind {
            RIM_TYPEKEYBOARD => Ok(RawPacket::Keyboard(read_pod(bytes, HEADER_SIZE)?)),
            RIM_TYPEMOUSE => Ok(RawPacket::Mouse(read_pod(bytes, HEADER_SIZE)?)),
            other => Err(RawInputError::UnknownType(other)),
        }
    }
}

fn read_pod<T: Pod>(bytes: &[u8], offset: usize) -> Result<T, RawInputError> {
    let needed = offset + std::mem::size_of::<T>();
    let slice = bytes.get(offset..needed).ok_or(RawInputError::ShortPacket {
        needed,
        got: bytes.len(),
    })?;
    bytemuck::try_pod_read_unaligned(slice).map_err(|_| RawInputError::ShortPacket {
        needed,
        got: bytes.len(),
    })
}

/// Platform facility delivering raw input packets.
pub trait RawInputSource {
    /// Size in bytes of the pending packet.
    fn packet_size(&mut self) -> Result<usize, RawInputError>;

    /// Copy the pending packet into `buf` (sized by [`Self::packet_size`]).
    /// Returns the number of bytes written.
    fn read_packet(&mut self, buf: &mut [u8]) -> Result<usize, RawInputError>;
}

/// Reusable packet reader.
///
/// Packets up to [`SCRATCH_SIZE`] bytes are read into an inline scratch
/// array. Larger ones get a heap buffer that lives only for that read.
pub struct RawInputReader {
    scratch: [u8; SCRATCH_SIZE],
}

impl Default for RawInputReader {
    fn default() -> Self {
        Self::new()
    }
}

impl RawInputReader {
    pub fn new() -> Self {
        Self {
            scratch: [0; SCRATCH_SIZE],
        }
    }

    /// Fetch and decode the source's pending packet.
    pub fn read(&mut self, source: &mut dyn RawInputSource) -> Result<RawPacket, RawInputError> {
        let size = source.packet_size()?;

        let mut overflow: Vec<u8>;
        let buf: &mut [u8] = if size <= SCRATCH_SIZE {
            &mut self.scratch[..size]
        } else {
            trace!("raw input packet of {size} bytes exceeds scratch buffer");
            overflow = Vec::new();
            overflow
                .try_reserve_exact(size)
                .map_err(|_| RawInputError::Alloc(size))?;
            overflow.resize(size, 0);
            &mut overflow[..]
        };

        let got = source.read_packet(buf)?;
        if got != size {
            return Err(RawInputError::LengthMismatch {
                expected: size,
                got,
            });
        }
        RawPacket::decode(buf)
    }
}

impl std::fmt::Debug for RawInputReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawInputReader")
            .field("scratch_size", &self.scratch.len())
            .finish()
    }
}
