mod admin_configurations;
