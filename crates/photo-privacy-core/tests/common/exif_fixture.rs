//! Builds big-endian TIFF blocks and splices them into JPEGs as APP1 segments.

/// One IFD entry with its payload
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Entry {
    Ascii(u16, &'static str),
    Short(u16, u16),
    Long(u16, u32),
    Rationals(u16, Vec<(u32, u32)>),
}

impl Entry {
    /// (tag, type, count, payload bytes)
    fn encode(&self) -> (u16, u16, u32, Vec<u8>) {
        match self {
            Entry::Ascii(tag, text) => {
                let mut bytes = text.as_bytes().to_vec();
                bytes.push(0);
                (*tag, 2, bytes.len() as u32, bytes)
            }
            Entry::Short(tag, value) => (*tag, 3, 1, value.to_be_bytes().to_vec()),
            Entry::Long(tag, value) => (*tag, 4, 1, value.to_be_bytes().to_vec()),
            Entry::Rationals(tag, values) => {
                let bytes = values
                    .iter()
                    .flat_map(|(num, denom)| {
                        num.to_be_bytes().into_iter().chain(denom.to_be_bytes())
                    })
                    .collect();
                (*tag, 5, values.len() as u32, bytes)
            }
        }
    }
}

pub const TAG_MAKE: u16 = 0x010F;
pub const TAG_MODEL: u16 = 0x0110;
pub const TAG_ORIENTATION: u16 = 0x0112;
pub const TAG_DATE_TIME: u16 = 0x0132;
pub const TAG_GPS_POINTER: u16 = 0x8825;
pub const TAG_GPS_LATITUDE_REF: u16 = 0x0001;
pub const TAG_GPS_LATITUDE: u16 = 0x0002;
pub const TAG_GPS_LONGITUDE_REF: u16 = 0x0003;
pub const TAG_GPS_LONGITUDE: u16 = 0x0004;

/// Encode one IFD that starts at `offset` within the TIFF block
fn encode_ifd(entries: &[Entry], offset: u32) -> Vec<u8> {
    let data_start = offset + 2 + 12 * entries.len() as u32 + 4;
    let mut ifd = Vec::new();
    let mut data = Vec::new();

    ifd.extend((entries.len() as u16).to_be_bytes());
    for entry in entries {
        let (tag, kind, count, payload) = entry.encode();
        ifd.extend(tag.to_be_bytes());
        ifd.extend(kind.to_be_bytes());
        ifd.extend(count.to_be_bytes());
        if payload.len() <= 4 {
            let mut inline = payload;
            inline.resize(4, 0);
            ifd.extend(inline);
        } else {
            let at = data_start + data.len() as u32;
            ifd.extend(at.to_be_bytes());
            data.extend(payload);
            // keep value offsets word aligned
            if data.len() % 2 == 1 {
                data.push(0);
            }
        }
    }
    ifd.extend(0u32.to_be_bytes());
    ifd.extend(data);
    ifd
}

/// TIFF block with a primary IFD and an optional GPS IFD
pub fn tiff_block(primary: &[Entry], gps: &[Entry]) -> Vec<u8> {
    let mut tiff = b"MM\x00\x2A".to_vec();
    tiff.extend(8u32.to_be_bytes());

    if gps.is_empty() {
        tiff.extend(encode_ifd(primary, 8));
        return tiff;
    }

    // The pointer entry has a fixed size, so measure with a placeholder first
    let mut entries = primary.to_vec();
    entries.push(Entry::Long(TAG_GPS_POINTER, 0));
    let gps_offset = 8 + encode_ifd(&entries, 8).len() as u32;
    if let Some(last) = entries.last_mut() {
        *last = Entry::Long(TAG_GPS_POINTER, gps_offset);
    }

    tiff.extend(encode_ifd(&entries, 8));
    tiff.extend(encode_ifd(gps, gps_offset));
    tiff
}

/// Insert an `Exif` APP1 segment directly after the JPEG SOI marker
pub fn with_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG");
    let length = (2 + 6 + tiff.len()) as u16;

    let mut out = jpeg[..2].to_vec();
    out.extend([0xFF, 0xE1]);
    out.extend(length.to_be_bytes());
    out.extend(b"Exif\x00\x00");
    out.extend(tiff);
    out.extend(&jpeg[2..]);
    out
}

/// Make "Acme", Model "X1", a capture time, and GPS 37N 122W
pub fn full_exif_entries() -> (Vec<Entry>, Vec<Entry>) {
    let primary = vec![
        Entry::Ascii(TAG_MAKE, "Acme"),
        Entry::Ascii(TAG_MODEL, "X1"),
        Entry::Ascii(TAG_DATE_TIME, "2023:05:14 10:30:00"),
    ];
    let gps = vec![
        Entry::Ascii(TAG_GPS_LATITUDE_REF, "N"),
        Entry::Rationals(TAG_GPS_LATITUDE, vec![(37, 1), (0, 1), (0, 1)]),
        Entry::Ascii(TAG_GPS_LONGITUDE_REF, "W"),
        Entry::Rationals(TAG_GPS_LONGITUDE, vec![(122, 1), (0, 1), (0, 1)]),
    ];
    (primary, gps)
}
