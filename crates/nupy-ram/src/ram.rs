//! The store itself: cells, addressing, and the read/write API.

use std::io::{self, Write};

use nupy_util::FxHashMap;
use thiserror::Error;

use crate::value::Value;

/// Number of cells a fresh store reserves up front.
const INITIAL_CAPACITY: usize = 4;

/// Error type for address-validated store operations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RamError {
    /// The address does not name an existing cell.
    #[error("invalid memory address {addr}")]
    InvalidAddress { addr: usize },
}

/// One (identifier, value) pair in the store.
#[derive(Clone, Debug)]
pub struct Cell {
    /// Variable name. Unique within the store.
    pub identifier: String,
    /// Current value.
    pub value: Value,
}

/// The dynamic variable space of a program.
///
/// Cells are append-only: an identifier is assigned an address (its
/// index in the cell vector) on first write and keeps that address for
/// the store's lifetime. A cell's value may be overwritten; its
/// identifier never changes.
///
/// The identifier→address hash index is a lookup accelerator only; the
/// cell vector remains the authoritative data.
///
/// # Examples
///
/// ```
/// use nupy_ram::{Ram, Value};
///
/// let mut ram = Ram::new();
/// ram.write_by_id("x", Value::Int(5));
///
/// assert_eq!(ram.read_by_id("x"), Some(Value::Int(5)));
/// assert_eq!(ram.address_of("x"), Some(0));
/// ```
pub struct Ram {
    cells: Vec<Cell>,
    index: FxHashMap<String, usize>,
}

impl Ram {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            cells: Vec::with_capacity(INITIAL_CAPACITY),
            index: FxHashMap::default(),
        }
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Writes `value` under `identifier`.
    ///
    /// Overwrites the existing cell if the identifier is known,
    /// otherwise appends a new cell at the next address. Always
    /// succeeds. Overwriting drops the previous value, which releases
    /// any string payload it owned.
    pub fn write_by_id(&mut self, identifier: &str, value: Value) {
        if let Some(&addr) = self.index.get(identifier) {
            self.cells[addr].value = value;
        } else {
            let addr = self.cells.len();
            self.index.insert(identifier.to_string(), addr);
            self.cells.push(Cell {
                identifier: identifier.to_string(),
                value,
            });
        }
    }

    /// Writes `value` into the cell at `addr`, keeping its identifier.
    ///
    /// Fails iff `addr` does not name an existing cell. An address
    /// only becomes valid once a variable has been written at it.
    pub fn write_by_addr(&mut self, addr: usize, value: Value) -> Result<(), RamError> {
        match self.cells.get_mut(addr) {
            Some(cell) => {
                cell.value = value;
                Ok(())
            }
            None => Err(RamError::InvalidAddress { addr }),
        }
    }

    /// Returns a copy of the value stored under `identifier`, or
    /// `None` if the identifier has never been written.
    pub fn read_by_id(&self, identifier: &str) -> Option<Value> {
        self.index
            .get(identifier)
            .map(|&addr| self.cells[addr].value.clone())
    }

    /// Returns a copy of the value stored at `addr`, or `None` if the
    /// address is invalid.
    pub fn read_by_addr(&self, addr: usize) -> Option<Value> {
        self.cells.get(addr).map(|cell| cell.value.clone())
    }

    /// Returns the address assigned to `identifier`, if it has ever
    /// been written. The result is stable: later writes of other
    /// identifiers never move a cell.
    pub fn address_of(&self, identifier: &str) -> Option<usize> {
        self.index.get(identifier).copied()
    }

    /// Iterates over the cells in address order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Writes a human-readable listing of the store contents.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "**MEMORY PRINT**")?;
        writeln!(out, "Capacity: {}", self.cells.capacity())?;
        writeln!(out, "Num values: {}", self.cells.len())?;
        writeln!(out, "Contents:")?;

        for (addr, cell) in self.cells.iter().enumerate() {
            write!(
                out,
                " {}: {}, {}, ",
                addr,
                cell.identifier,
                cell.value.kind_name()
            )?;
            match &cell.value {
                Value::Int(i) => writeln!(out, "{i}")?,
                Value::Real(d) => writeln!(out, "{d:.6}")?,
                Value::Str(s) => writeln!(out, "'{s}'")?,
                Value::Bool(b) => writeln!(out, "{}", if *b { "True" } else { "False" })?,
                Value::Ptr(a) => writeln!(out, "{a}")?,
                Value::None => writeln!(out, "None")?,
            }
        }

        writeln!(out, "**END PRINT**")
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}
