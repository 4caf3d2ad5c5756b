//! User-facing texts, in the deployment's language (Bahasa Indonesia).
//!
//! Log lines stay in English; anything that can end up on a check-in page or in
//! the admin panel comes from here.

pub const SUBMIT_SUCCESS: &str = "Absensi berhasil dicatat";
pub const SUBMIT_FAILED: &str = "Gagal menyimpan data";
pub const SUBMIT_UNEXPECTED: &str = "Terjadi kesalahan saat menyimpan absensi";

pub const INVALID_APPS_SCRIPT_URL: &str =
    "URL Apps Script tidak valid. Pastikan format: https://script.google.com/macros/s/.../exec";
pub const INVALID_APPS_SCRIPT_URL_ADMIN: &str =
    "Format URL tidak valid. Contoh: https://script.google.com/macros/s/ABC123xyz/exec";
pub const INVALID_URL_SHORT: &str = "Format URL tidak valid";

pub const UNREACHABLE: &str =
    "Tidak dapat terhubung ke Google Sheets. Periksa koneksi internet atau URL Apps Script.";
pub const TIMEOUT: &str = "Google Sheets tidak merespons. Silakan coba lagi.";

pub const CONNECTION_OK: &str = "Koneksi berhasil! URL Apps Script valid.";
pub const CONNECTION_UNREACHABLE: &str = "Tidak dapat terhubung ke URL tersebut";

pub const EVENT_NOT_FOUND: &str = "Event tidak ditemukan atau sudah tidak aktif";
pub const EVENT_LOAD_FAILED: &str = "Gagal memuat data event";
pub const SHEETS_NOT_CONFIGURED: &str = "Link Google Sheets belum dikonfigurasi";

pub const THANK_YOU: &str = "Terima kasih telah mengisi absensi";

/// `"Koneksi gagal (HTTP 404)"`
pub fn connection_failed(status: u16) -> String {
    format!("Koneksi gagal (HTTP {status})")
}

/// Shown by the submission helper when a segment has no destination.
pub fn segment_not_configured(segment: &str) -> String {
    format!("URL Google Sheets belum dikonfigurasi untuk absensi {segment}")
}

pub fn invalid_response(detail: &str) -> String {
    format!("Respons Google Sheets tidak valid: {detail}")
}

pub fn field_required(label: &str) -> String {
    format!("{label} wajib diisi")
}

pub fn field_must_be_number(label: &str, min: i64) -> String {
    format!("{label} harus berupa angka minimal {min}")
}

pub fn field_must_be_digits(label: &str) -> String {
    format!("{label} hanya boleh berisi angka")
}

pub fn field_must_be_phone(label: &str) -> String {
    format!("{label} harus berupa nomor telepon yang valid")
}

pub const EVENT_MISSING: &str = "Event tidak ditemukan";
pub const EVENT_NAME_LABEL: &str = "Nama Event";
pub const QR_MISSING: &str = "QR code belum dibuat untuk event ini";
pub const QR_FAILED: &str = "Gagal membuat QR code";
pub const UNKNOWN_SEGMENT: &str = "Jenis absensi tidak dikenal";
