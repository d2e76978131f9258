pub mod mock_email_client;
