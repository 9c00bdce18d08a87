pub mod nfc_manager;
