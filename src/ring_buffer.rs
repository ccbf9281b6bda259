use crate::error::Error;
use log::{debug, trace};
use std::cmp::Ordering;
use std::fmt;

/// Smallest usable capacity: one data byte plus the reserved slot.
pub const MIN_CAPACITY: usize = 2;

/// Layout of the buffered bytes relative to the physical end of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Cursors coincide, nothing buffered.
    Empty,
    /// Data lies in `[read, write)`.
    Contiguous,
    /// Data lies in `[read, capacity)` followed by `[0, write)`.
    Wrapped,
}

/// Fixed-capacity circular byte buffer.
///
/// One slot of the store is always kept free so that a full buffer never
/// presents the same cursor layout as an empty one. Writes and reads that
/// cross the physical end of the store are split into at most two copies.
pub struct RingBuffer {
    buffer: Vec<u8>,
    write_pos: usize,
    read_pos: usize,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Result<Self, Error> {
        if capacity < MIN_CAPACITY {
            return Err(Error::InvalidCapacity(capacity));
        }
        Ok(Self {
            buffer: vec![0; capacity],
            write_pos: 0,
            read_pos: 0,
            capacity,
        })
    }

    /// Length of the backing store, not the number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn write_cursor(&self) -> usize {
        self.write_pos
    }

    pub fn read_cursor(&self) -> usize {
        self.read_pos
    }

    /// Raw store contents, including bytes that are no longer reachable.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn state(&self) -> State {
        match self.write_pos.cmp(&self.read_pos) {
            Ordering::Equal => State::Empty,
            Ordering::Greater => State::Contiguous,
            Ordering::Less => State::Wrapped,
        }
    }

    /// Number of unread bytes.
    pub fn occupied_size(&self) -> usize {
        match self.state() {
            State::Empty => 0,
            State::Contiguous => self.write_pos - self.read_pos,
            State::Wrapped => self.write_pos + self.capacity - self.read_pos,
        }
    }

    /// Number of bytes a push may still accept.
    pub fn available_size(&self) -> usize {
        self.capacity - self.occupied_size() - 1
    }

    /// Bytes readable from the read cursor without crossing the end of the store.
    pub fn contiguous_readable_size(&self) -> usize {
        match self.state() {
            State::Empty => 0,
            State::Contiguous => self.write_pos - self.read_pos,
            State::Wrapped => self.capacity - self.read_pos,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.write_pos == self.read_pos
    }

    /// True when only the reserved slot is left.
    ///
    /// The comparison is not taken modulo the capacity, so a full buffer whose
    /// write cursor sits on the last byte of the store (read cursor at 0)
    /// reports `false`. Use `available_size() == 0` for an exact check.
    pub fn is_full(&self) -> bool {
        self.write_pos + 1 == self.read_pos
    }

    /// Resets both cursors. Store contents are left in place.
    pub fn clear(&mut self) {
        trace!("clear: write {} read {} -> 0", self.write_pos, self.read_pos);
        self.write_pos = 0;
        self.read_pos = 0;
    }

    /// Changes the store length and discards everything buffered.
    ///
    /// Shrinking truncates the store from the end; growing zero-extends it.
    pub fn resize(&mut self, capacity: usize) -> Result<(), Error> {
        if capacity < MIN_CAPACITY {
            return Err(Error::InvalidCapacity(capacity));
        }
        if capacity == self.capacity {
            return Ok(());
        }
        debug!(
            "resize: {} -> {} bytes, dropping {} buffered bytes",
            self.capacity,
            capacity,
            self.occupied_size()
        );
        self.buffer.resize(capacity, 0);
        self.capacity = capacity;
        self.clear();
        Ok(())
    }

    /// Bounds of the largest contiguous range a single write may fill.
    fn writable_range(&self) -> Result<(usize, usize), Error> {
        let limit = (self.read_pos + self.capacity - 1) % self.capacity;
        match self.write_pos.cmp(&limit) {
            Ordering::Less => Ok((self.write_pos, limit)),
            Ordering::Greater => Ok((self.write_pos, self.capacity)),
            Ordering::Equal => Err(Error::Overflow {
                requested: 1,
                available: 0,
            }),
        }
    }

    /// Contiguous writable region starting at the write cursor.
    ///
    /// Fill a prefix of the returned slice, then commit it with
    /// [`shift_write_cursor`](Self::shift_write_cursor). Once the slice has been
    /// filled up to the end of the store, the next call continues from index 0.
    pub fn writable_span(&mut self) -> Result<&mut [u8], Error> {
        let (start, end) = self.writable_range()?;
        Ok(&mut self.buffer[start..end])
    }

    /// Advances the write cursor by `nbytes`, modulo the capacity.
    ///
    /// No bounds checking: `nbytes` must not exceed `available_size()`.
    pub fn shift_write_cursor(&mut self, nbytes: usize) {
        let next = (self.write_pos + nbytes) % self.capacity;
        trace!("shift write cursor by {}: {} -> {}", nbytes, self.write_pos, next);
        self.write_pos = next;
    }

    /// Appends `data`, failing without side effects if it does not fit.
    pub fn push(&mut self, data: &[u8]) -> Result<(), Error> {
        let length = data.len();
        let available = self.available_size();
        if length > available {
            return Err(Error::Overflow {
                requested: length,
                available,
            });
        }

        // A full buffer has no writable span, even for an empty slice.
        let (start, end) = self
            .writable_range()
            .map_err(|_| Error::Overflow {
                requested: length,
                available,
            })?;
        if length == 0 {
            return Ok(());
        }

        let span = end - start;
        if span >= length {
            self.buffer[start..start + length].copy_from_slice(data);
        } else {
            // Fill up to the end of the store, the rest lands before the read cursor.
            let (head, tail) = data.split_at(span);
            self.buffer[start..end].copy_from_slice(head);
            self.buffer[..tail.len()].copy_from_slice(tail);
        }

        self.shift_write_cursor(length);
        Ok(())
    }

    fn check_readable(&self, nbytes: usize) -> Result<(), Error> {
        if nbytes < 1 {
            return Err(Error::InvalidLength(nbytes));
        }
        let occupied = self.occupied_size();
        if nbytes > occupied {
            return Err(Error::Overflow {
                requested: nbytes,
                available: occupied,
            });
        }
        Ok(())
    }

    fn advance_read_cursor(&mut self, nbytes: usize) {
        let next = (self.read_pos + nbytes) % self.capacity;
        trace!("shift read cursor by {}: {} -> {}", nbytes, self.read_pos, next);
        self.read_pos = next;
    }

    /// Removes and returns the oldest `nbytes` bytes.
    pub fn pull(&mut self, nbytes: usize) -> Result<Vec<u8>, Error> {
        self.check_readable(nbytes)?;

        let start = self.read_pos;
        let mut result = Vec::with_capacity(nbytes);
        if start + nbytes <= self.capacity {
            result.extend_from_slice(&self.buffer[start..start + nbytes]);
        } else {
            // Wrapped: take the tail of the store, then the head.
            let wrapped = start + nbytes - self.capacity;
            result.extend_from_slice(&self.buffer[start..]);
            result.extend_from_slice(&self.buffer[..wrapped]);
        }

        self.advance_read_cursor(nbytes);
        Ok(result)
    }

    /// Contiguous readable region starting at the read cursor.
    pub fn readable_span(&self) -> &[u8] {
        let start = self.read_pos;
        &self.buffer[start..start + self.contiguous_readable_size()]
    }

    /// Drops the oldest `nbytes` bytes without copying them out.
    pub fn discard(&mut self, nbytes: usize) -> Result<(), Error> {
        self.check_readable(nbytes)?;
        self.advance_read_cursor(nbytes);
        Ok(())
    }
}

impl fmt::Debug for RingBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RingBuffer {{ store: b\"{}\", write: {}, read: {} }}",
            self.buffer.escape_ascii(),
            self.write_pos,
            self.read_pos
        )
    }
}
